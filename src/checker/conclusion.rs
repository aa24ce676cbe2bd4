use std::time::Duration;

use tracing::debug;

use crate::report::attempt::Attempt;
use crate::report::check_result::{CheckResult, Status};
use crate::report::stats;

type Rule = fn(&[Attempt], Duration) -> Option<(Status, Option<String>)>;

/// Classification rules in strict priority order: the first rule that matches determines the
///  status, the default is healthy.
const RULES: [Rule; 2] = [down_rule, degraded_rule];

/// Finalizes a check cycle: classifies the attempts and assembles the immutable [CheckResult].
///  The threshold is recorded on the result whether or not it influenced the verdict.
pub fn conclude(
    title: String,
    timestamp: u64,
    attempts: Vec<Attempt>,
    threshold_rtt: Duration,
) -> CheckResult {
    let (status, notice) = classify(&attempts, threshold_rtt);
    debug!("check of {:?} concluded: {}", title, status);

    CheckResult {
        title,
        timestamp,
        attempts,
        threshold_rtt,
        status,
        notice,
    }
}

fn classify(attempts: &[Attempt], threshold_rtt: Duration) -> (Status, Option<String>) {
    for rule in RULES {
        if let Some(verdict) = rule(attempts, threshold_rtt) {
            return verdict;
        }
    }
    (Status::Healthy, None)
}

/// A single failed attempt dominates the verdict, regardless of how many others succeeded.
fn down_rule(attempts: &[Attempt], _threshold_rtt: Duration) -> Option<(Status, Option<String>)> {
    attempts.iter()
        .any(|a| a.is_failure())
        .then(|| (Status::Down, None))
}

fn degraded_rule(attempts: &[Attempt], threshold_rtt: Duration) -> Option<(Status, Option<String>)> {
    if threshold_rtt == Duration::ZERO {
        return None;
    }

    let median = stats::compute(attempts).median;
    (median > threshold_rtt).then(|| {
        let notice = format!("median round trip time exceeded threshold ({:?})", threshold_rtt);
        (Status::Degraded, Some(notice))
    })
}
