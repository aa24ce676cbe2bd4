use std::time::Duration;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Immutable configuration for one checker instance. Each instance checks one ensemble; several
///  instances with their own configs can run concurrently without sharing any state.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// display name of the checked ensemble, used as the result title
    pub name: String,

    /// `host:port` addresses of all ensemble members
    pub servers: Vec<String>,

    /// per-attempt network timeout; zero selects the 1s default
    pub timeout: Duration,

    /// query per-node roles and apply the quorum consistency rules instead of plain liveness
    pub detailed: bool,

    /// a median RTT above this threshold degrades the result; zero disables the check
    pub threshold_rtt: Duration,

    /// number of probe attempts per check cycle, clamped to at least 1
    pub attempts: u32,
}

impl Default for CheckerConfig {
    fn default() -> CheckerConfig {
        CheckerConfig {
            name: String::new(),
            servers: Vec::new(),
            timeout: Duration::ZERO,
            detailed: false,
            threshold_rtt: Duration::ZERO,
            attempts: 1,
        }
    }
}

impl CheckerConfig {
    pub fn new(name: impl Into<String>, servers: Vec<String>) -> CheckerConfig {
        CheckerConfig {
            name: name.into(),
            servers,
            ..Default::default()
        }
    }

    /// The only hard configuration error: a checker without any ensemble members to probe.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.servers.is_empty() {
            bail!("checker {:?} has no ensemble member addresses configured", self.name);
        }
        Ok(())
    }

    pub fn effective_timeout(&self) -> Duration {
        if self.timeout == Duration::ZERO {
            Duration::from_secs(1)
        } else {
            self.timeout
        }
    }

    pub fn effective_attempts(&self) -> u32 {
        self.attempts.max(1)
    }
}
