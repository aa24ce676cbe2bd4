use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::report::attempt::Attempt;

/// Round trip time statistics over the attempts of one check cycle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Stats {
    pub total: Duration,
    pub min: Duration,
    pub max: Duration,
    pub mean: Duration,
    pub median: Duration,
}

/// Computes RTT statistics across all attempts, failed ones included. An empty attempt list
///  yields all-zero stats.
pub fn compute(attempts: &[Attempt]) -> Stats {
    if attempts.is_empty() {
        return Stats::default();
    }

    let mut sorted = attempts.iter()
        .map(|a| a.rtt)
        .collect::<Vec<_>>();
    sorted.sort();

    let total: Duration = sorted.iter().sum();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2
    };

    Stats {
        total,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean: total / sorted.len() as u32,
        median,
    }
}
