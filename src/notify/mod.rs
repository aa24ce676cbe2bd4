pub mod notifier;
pub mod topic_publisher;
