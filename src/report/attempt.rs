use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One probe execution: the measured round trip time, and what (if anything) went wrong.
///
/// The round trip time is recorded even for failed attempts - it is the elapsed time until the
///  failure was observed in that case.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Attempt {
    pub rtt: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Attempt {
    pub fn success(rtt: Duration) -> Attempt {
        Attempt {
            rtt,
            error: None,
        }
    }

    pub fn failure(rtt: Duration, error: impl Into<String>) -> Attempt {
        Attempt {
            rtt,
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
