use std::sync::Arc;

use failover_core::alert::AlertSink;
use failover_core::config::Config;
use failover_core::connector::ConnectorId;
use failover_core::controller::FailoverController;
use failover_core::store::{StateStore, memory::InMemoryStore};
use failover_core::test_support::{ManualClock, MockConnector};

use async_trait::async_trait;

/// Records every alert it receives so tests can assert on edge counts
/// without scraping logs.
#[derive(Default)]
pub struct RecordingAlertSink {
    pub error_alerts: std::sync::Mutex<Vec<(String, String)>>,
    pub recovery_alerts: std::sync::Mutex<Vec<String>>,
}

#[async_trait]
impl AlertSink for RecordingAlertSink {
    async fn send_error_alert(
        &self,
        source: &str,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.error_alerts
            .lock()
            .unwrap()
            .push((source.to_owned(), message.to_owned()));
        Ok(())
    }

    async fn send_recovery_alert(
        &self,
        source: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.recovery_alerts.lock().unwrap().push(source.to_owned());
        Ok(())
    }
}

/// The brevity fixture used throughout `spec.md` §8: `N_trip=3`,
/// `T_err=10s`, `T_lock=60s`.
pub struct Fixture {
    pub clock: Arc<ManualClock>,
    pub store: Arc<InMemoryStore>,
    pub primary: Arc<MockConnector>,
    pub standby: Arc<MockConnector>,
    pub alert: Arc<RecordingAlertSink>,
    pub controller: Arc<FailoverController>,
}

pub fn build_fixture() -> Fixture {
    let clock = Arc::new(ManualClock::new());
    let store = Arc::new(InMemoryStore::new(clock.clone()));
    let primary = Arc::new(MockConnector::new(ConnectorId::Primary, ["SYS_ABNORMAL"]));
    let standby = Arc::new(MockConnector::new(ConnectorId::Standby, ["SYS_ABNORMAL"]));
    let alert = Arc::new(RecordingAlertSink::default());

    let config = Config::new()
        .with_err_threshold(3)
        .with_err_ttl_ms(10_000)
        .with_lock_ttl_ms(60_000);

    let store_dyn: Arc<dyn StateStore> = store.clone();
    let clock_dyn: Arc<dyn failover_core::clock::Clock> = clock.clone();
    let alert_dyn: Arc<dyn AlertSink> = alert.clone();
    let primary_dyn: Arc<dyn failover_core::connector::Connector> = primary.clone();
    let standby_dyn: Arc<dyn failover_core::connector::Connector> = standby.clone();

    let controller = Arc::new(FailoverController::new(
        config, store_dyn, clock_dyn, alert_dyn, primary_dyn, standby_dyn,
    ));

    Fixture {
        clock,
        store,
        primary,
        standby,
        alert,
        controller,
    }
}
