use std::fmt::{Display, Formatter};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::report::attempt::Attempt;
use crate::report::stats::{self, Stats};

/// Verdict for one completed check cycle. The variants are mutually exclusive by construction,
///  and exactly one of them is assigned when a [CheckResult] is concluded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Healthy,
    Degraded,
    Down,
}

impl Status {
    pub fn is_healthy(&self) -> bool {
        *self == Status::Healthy
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Healthy => "healthy",
            Status::Degraded => "degraded",
            Status::Down => "down",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The outcome of one full check cycle against an ensemble. Populated by the checker, finalized
///  by the conclusion rules, immutable afterwards.
///
/// A notice is present only for degraded results; down results carry their explanation in the
///  per-attempt error fields instead.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CheckResult {
    pub title: String,
    /// nanoseconds since the UNIX epoch, taken at the start of the check
    pub timestamp: u64,
    pub attempts: Vec<Attempt>,
    /// the round trip time threshold the conclusion was evaluated against (zero when disabled)
    pub threshold_rtt: Duration,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl CheckResult {
    pub fn compute_stats(&self) -> Stats {
        stats::compute(&self.attempts)
    }
}

impl Display for CheckResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "== {} - {}", self.title, self.status)?;
        for (i, attempt) in self.attempts.iter().enumerate() {
            match &attempt.error {
                Some(error) => writeln!(f, "  attempt {}: {:?} ({})", i + 1, attempt.rtt, error)?,
                None => writeln!(f, "  attempt {}: {:?}", i + 1, attempt.rtt)?,
            }
        }
        if self.threshold_rtt > Duration::ZERO {
            writeln!(f, "  threshold: {:?}", self.threshold_rtt)?;
        }
        if let Some(notice) = &self.notice {
            writeln!(f, "  notice: {}", notice)?;
        }
        Ok(())
    }
}

/// current wall clock time in the representation used for [CheckResult::timestamp]
pub fn timestamp_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
