use async_trait::async_trait;

/// Sink for the two operator-facing alert edges the controller emits.
///
/// Both methods return a `Result` but the controller only ever logs and
/// drops the error (`spec.md` §7, taxonomy entry 4: alert-emission failure is
/// never propagated to the caller). The delivery transport itself (Slack,
/// PagerDuty, SMS, ...) is explicitly out of scope for this crate; implement
/// this trait against whatever transport the deployment uses.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Fired once per PRIMARY → STANDBY edge. `source` names the connector
    /// that tripped (by convention, the one whose failure count reached
    /// threshold); `message` is a human-readable summary.
    async fn send_error_alert(
        &self,
        source: &str,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Fired once per STANDBY → PRIMARY edge. `source` names the connector
    /// being restored (PRIMARY, in the two-connector model this crate
    /// implements).
    async fn send_recovery_alert(
        &self,
        source: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Dependency-free [`AlertSink`] that turns both edges into `tracing` events.
///
/// Gives the controller a usable default without wiring a real notification
/// transport — useful for local development, for the `failover-demo` binary,
/// and as a fallback layer in front of a real sink (log first, then attempt
/// delivery).
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingAlertSink;

#[async_trait]
impl AlertSink for LoggingAlertSink {
    async fn send_error_alert(
        &self,
        source: &str,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::error!(target: "failover::alert", source, message, "connector tripped");
        Ok(())
    }

    async fn send_recovery_alert(
        &self,
        source: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(target: "failover::alert", source, "connector recovered");
        Ok(())
    }
}
