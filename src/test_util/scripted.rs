use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::probe::diagnostics::{DiagnosticTransport, NodeRole};

/// [DiagnosticTransport] double for unit tests: replays pre-programmed per-query responses, each
///  optionally preceded by a simulated response delay.
///
/// Delays are served from their own queue, one per query, defaulting to zero when the queue is
///  exhausted. Under a paused tokio clock the delay becomes the exact RTT the checker measures,
///  making timing assertions deterministic.
pub struct ScriptedDiagnostics {
    delays: Mutex<VecDeque<Duration>>,
    liveness_responses: Mutex<VecDeque<Vec<bool>>>,
    role_responses: Mutex<VecDeque<Vec<NodeRole>>>,
}

impl ScriptedDiagnostics {
    pub fn new() -> ScriptedDiagnostics {
        ScriptedDiagnostics {
            delays: Mutex::new(VecDeque::new()),
            liveness_responses: Mutex::new(VecDeque::new()),
            role_responses: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push_delay(&self, delay: Duration) {
        self.delays.lock().unwrap().push_back(delay);
    }

    pub fn push_liveness(&self, responses: Vec<bool>) {
        self.liveness_responses.lock().unwrap().push_back(responses);
    }

    pub fn push_roles(&self, roles: Vec<NodeRole>) {
        self.role_responses.lock().unwrap().push_back(roles);
    }

    async fn simulate_delay(&self) {
        let delay = self.delays.lock().unwrap().pop_front().unwrap_or(Duration::ZERO);
        if delay > Duration::ZERO {
            sleep(delay).await;
        }
    }
}

impl Default for ScriptedDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiagnosticTransport for ScriptedDiagnostics {
    async fn liveness(&self, _servers: &[String], _timeout: Duration) -> Vec<bool> {
        self.simulate_delay().await;
        self.liveness_responses.lock().unwrap()
            .pop_front()
            .expect("no scripted liveness response left")
    }

    async fn roles(&self, _servers: &[String], _timeout: Duration) -> Vec<NodeRole> {
        self.simulate_delay().await;
        self.role_responses.lock().unwrap()
            .pop_front()
            .expect("no scripted role response left")
    }
}
