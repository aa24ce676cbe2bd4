pub mod checker;
pub mod notify;
pub mod probe;
pub mod report;
pub mod test_util;
