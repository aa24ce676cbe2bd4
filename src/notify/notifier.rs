use async_trait::async_trait;
#[cfg(test)] use mockall::automock;
use tracing::info;

use crate::report::check_result::CheckResult;

/// Delivery seam for alerts. Concrete transports own their wire protocol and credential
///  resolution; the [Notifier] only decides *what* to send and *when*.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AlertTransport: Send + Sync {
    async fn publish(&self, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Dispatches one alert per unhealthy result through the given transport.
pub struct Notifier<T: AlertTransport> {
    transport: T,
}

impl<T: AlertTransport> Notifier<T> {
    pub fn new(transport: T) -> Notifier<T> {
        Notifier {
            transport,
        }
    }

    /// Sends an alert for every result that is not healthy. A delivery failure propagates
    ///  immediately, aborting the remaining notifications of this cycle - no retries, no
    ///  partial-success bookkeeping.
    pub async fn notify(&self, results: &[CheckResult]) -> anyhow::Result<()> {
        for result in results {
            if result.status.is_healthy() {
                continue;
            }

            let subject = format!("[quorumcheck] {} {}", result.title, result.status);
            info!("notifying: {}", subject);
            self.transport.publish(&subject, &result.to_string()).await?;
        }
        Ok(())
    }
}
