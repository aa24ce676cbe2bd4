use std::sync::Arc;

use tokio::time::Instant;
use tracing::debug;

use crate::checker::checker_config::CheckerConfig;
use crate::checker::conclusion;
use crate::checker::quorum;
use crate::probe::diagnostics::DiagnosticTransport;
use crate::report::attempt::Attempt;
use crate::report::check_result::{timestamp_nanos, CheckResult};

/// fixed error recorded on an attempt that failed the quorum rules
const QUORUM_ERROR: &str = "one or more nodes reported errors";

/// Runs check cycles against one ensemble. The diagnostic transport is an explicit constructor
///  argument so tests (and alternative protocols) can substitute their own implementation.
pub struct EnsembleChecker {
    config: CheckerConfig,
    transport: Arc<dyn DiagnosticTransport>,
}

impl EnsembleChecker {
    pub fn new(config: CheckerConfig, transport: Arc<dyn DiagnosticTransport>) -> EnsembleChecker {
        EnsembleChecker {
            config,
            transport,
        }
    }

    /// Runs one full check cycle: the configured number of attempts, concluded into a finalized
    ///  [CheckResult].
    ///
    /// Returns a hard error only for configuration problems, before any probing starts.
    ///  Unhealthiness of the ensemble is encoded in the result, never raised.
    pub async fn check(&self) -> anyhow::Result<CheckResult> {
        self.config.validate()?;

        let timestamp = timestamp_nanos();
        let attempts = self.do_attempts().await;

        Ok(conclusion::conclude(
            self.config.name.clone(),
            timestamp,
            attempts,
            self.config.threshold_rtt,
        ))
    }

    /// Executes all attempts strictly sequentially: each attempt's RTT window must not overlap
    ///  another's, so the attempts sample the ensemble at distinct moments.
    async fn do_attempts(&self) -> Vec<Attempt> {
        let timeout = self.config.effective_timeout();
        let num_attempts = self.config.effective_attempts();

        let mut attempts = Vec::with_capacity(num_attempts as usize);
        for i in 0..num_attempts {
            let start = Instant::now();
            let ok = if self.config.detailed {
                let roles = self.transport.roles(&self.config.servers, timeout).await;
                quorum::evaluate_roles(&roles)
            } else {
                let responses = self.transport.liveness(&self.config.servers, timeout).await;
                quorum::evaluate_liveness(&responses)
            };
            let rtt = start.elapsed();

            debug!("attempt {}/{} against {:?}: ok={} rtt={:?}", i + 1, num_attempts, self.config.name, ok, rtt);

            attempts.push(if ok {
                Attempt::success(rtt)
            } else {
                Attempt::failure(rtt, QUORUM_ERROR)
            });
        }
        attempts
    }
}
