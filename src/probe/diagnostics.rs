use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)] use mockall::automock;

/// Role a node reports for itself in response to a detailed diagnostic query.
///
/// Unreachable nodes, timed-out queries and unparseable responses are all represented as
///  [NodeRole::Unknown] rather than raised as errors - a node that cannot state its role is
///  treated the same as a node reporting an inconsistent one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeRole {
    Follower,
    Leader,
    Standalone,
    Unknown,
}

/// Seam to the ensemble's diagnostic protocol. The checker receives an implementation as an
///  explicit constructor argument, so tests can substitute a double without any global state.
///
/// Implementations never fail hard: per-node transport errors surface as `false` liveness or
///  [NodeRole::Unknown], one entry per queried server.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DiagnosticTransport: Send + Sync {
    /// plain liveness probe: one flag per queried server
    async fn liveness(&self, servers: &[String], timeout: Duration) -> Vec<bool>;

    /// detailed probe: one self-reported role per queried server
    async fn roles(&self, servers: &[String], timeout: Duration) -> Vec<NodeRole>;
}
