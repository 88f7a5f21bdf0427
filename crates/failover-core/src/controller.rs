use std::future::Future;
use std::sync::Arc;

use crate::alert::AlertSink;
use crate::clock::Clock;
use crate::config::Config;
use crate::connector::{CallOutcome, Connector, ConnectorId, TransportError};
use crate::error::ControllerError;
use crate::store::{StateStore, StoreError, Ttl};

/// Selects a connector per call, interprets outcomes, mutates the shared
/// state store, and emits operator alerts on trip/recovery edges.
///
/// The controller holds no mutable state of its own: every field here is
/// either immutable (the two connector bindings, the config, the clock) or a
/// shared handle to something external (`store`, `alert`). Two controllers
/// pointed at the same store and the same two connectors are interchangeable
/// — that is what lets multiple replicas run this unmodified and still agree.
pub struct FailoverController {
    config: Config,
    store: Arc<dyn StateStore>,
    clock: Arc<dyn Clock>,
    alert: Arc<dyn AlertSink>,
    primary: Arc<dyn Connector>,
    standby: Arc<dyn Connector>,
}

impl FailoverController {
    pub fn new(
        config: Config,
        store: Arc<dyn StateStore>,
        clock: Arc<dyn Clock>,
        alert: Arc<dyn AlertSink>,
        primary: Arc<dyn Connector>,
        standby: Arc<dyn Connector>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
            alert,
            primary,
            standby,
        }
    }

    fn connector_for(&self, id: ConnectorId) -> &Arc<dyn Connector> {
        match id {
            ConnectorId::Primary => &self.primary,
            ConnectorId::Standby => &self.standby,
        }
    }

    /// Read-only observation of `RoutingState`. Missing or unreadable
    /// defaults to PRIMARY — absence is a normal, documented state, and a
    /// store read failure fails open to the default route rather than
    /// halting the caller.
    pub async fn now_connect(&self) -> ConnectorId {
        match self.store.get(&self.config.key_connector).await {
            Ok(value) => ConnectorId::from_store_value(value.as_deref()),
            Err(err) => {
                tracing::warn!(error = %err, "store read failed in now_connect; defaulting to PRIMARY");
                ConnectorId::Primary
            }
        }
    }

    /// The five-step selection algorithm from `spec.md` §4.3. A store read
    /// failure at any point fails open to PRIMARY, per the §7 propagation
    /// policy ("a broken state store should not also break the primary
    /// path").
    async fn select(&self, pin: Option<ConnectorId>, need_standby_reroute: bool) -> ConnectorId {
        if let Some(id) = pin {
            return id;
        }

        if self.now_connect().await == ConnectorId::Primary {
            return ConnectorId::Primary;
        }

        match self.store.exists(&self.config.key_lock_time).await {
            Ok(true) => ConnectorId::Standby,
            Ok(false) if need_standby_reroute => ConnectorId::Primary,
            Ok(false) => ConnectorId::Standby,
            Err(err) => {
                tracing::warn!(error = %err, "store read failed while checking cooldown lock; defaulting to PRIMARY");
                ConnectorId::Primary
            }
        }
    }

    /// The central entry point: select a connector, run the caller's
    /// operation against it, and interpret the result.
    ///
    /// `op` receives the selected connector id and a reference to the bound
    /// `Connector` and must resolve to either a `CallOutcome` or a
    /// `TransportError` (the connector layer failing before producing a
    /// usable response). Only a materialized `CallOutcome` can move the
    /// sliding window or `RoutingState`; a `TransportError` is returned to
    /// the caller untouched.
    pub async fn invoke<F, Fut>(
        &self,
        op: F,
        pin: Option<ConnectorId>,
        need_standby_reroute: bool,
    ) -> Result<CallOutcome, ControllerError>
    where
        F: FnOnce(ConnectorId, &dyn Connector) -> Fut,
        Fut: Future<Output = Result<CallOutcome, TransportError>>,
    {
        let selected = self.select(pin, need_standby_reroute).await;
        let connector = self.connector_for(selected);

        let outcome = op(selected, connector.as_ref()).await?;

        if outcome.is_success() {
            return self
                .reset_failure_count(outcome.origin)
                .await
                .map(|()| outcome)
                .map_err(ControllerError::Recovery);
        }

        let origin_connector = self.connector_for(outcome.origin);
        if origin_connector.is_system_abnormal(&outcome.failure_code) {
            let bookkeeping = self.add_failure_count(outcome.origin).await.err();
            Err(ControllerError::SystemAbnormal {
                outcome,
                bookkeeping,
            })
        } else {
            Err(ControllerError::BusinessRejected(outcome))
        }
    }

    /// Records one system-abnormal failure for `c` and trips PRIMARY →
    /// STANDBY if the sliding window has reached threshold.
    ///
    /// 1. If `RoutingState` is already STANDBY, slide the cooldown lock
    ///    forward — every failure observed while in STANDBY extends the
    ///    minimum dwell time, so a still-misbehaving primary can't let the
    ///    lock expire out from under it.
    /// 2. Insert a `FailureMark` for `c` at the current timestamp, TTL
    ///    `T_err`.
    /// 3. Count live marks for `c`. At or above `N_trip`, flip `RoutingState`
    ///    to STANDBY (no TTL), arm the cooldown lock, and emit a trip alert.
    async fn add_failure_count(&self, c: ConnectorId) -> Result<(), StoreError> {
        if self.now_connect().await == ConnectorId::Standby {
            self.arm_lock().await?;
            tracing::debug!(connector = %c, "cooldown lock slid forward by a STANDBY-side failure");
        }

        let mark_key = self.config.err_mark_key(c, self.clock.now_ms());
        self.store
            .set(&mark_key, "1", Ttl::Millis(self.config.err_ttl_ms))
            .await?;

        let live_marks = self
            .store
            .scan_prefix(&self.config.err_mark_prefix(c))
            .await?;
        tracing::debug!(connector = %c, live_marks = live_marks.len(), threshold = self.config.err_threshold, "failure mark recorded");

        if live_marks.len() >= self.config.err_threshold {
            self.store
                .set(
                    &self.config.key_connector,
                    ConnectorId::Standby.as_str(),
                    Ttl::None,
                )
                .await?;
            self.arm_lock().await?;

            tracing::warn!(
                connector = %c,
                live_marks = live_marks.len(),
                "tripped to STANDBY"
            );

            self.emit_trip_alert(
                c,
                &format!(
                    "{c} recorded {} system-abnormal failures within the sliding window; routing to STANDBY",
                    live_marks.len()
                ),
            )
            .await;
        }

        Ok(())
    }

    /// Clears the sliding window for `c` and, if the cooldown has expired and
    /// `RoutingState` is not already PRIMARY, flips back and emits a recovery
    /// alert.
    ///
    /// 1. If the cooldown lock is still armed, do nothing — STANDBY's dwell
    ///    time floor has not elapsed yet.
    /// 2. If `RoutingState` is already PRIMARY, there is nothing to recover.
    /// 3. Delete every live `FailureMark` for `c` so the next failure starts
    ///    a fresh window.
    /// 4. Flip `RoutingState` to PRIMARY (no TTL) and emit a recovery alert.
    async fn reset_failure_count(&self, c: ConnectorId) -> Result<(), StoreError> {
        if self.store.exists(&self.config.key_lock_time).await? {
            return Ok(());
        }

        if self.now_connect().await == ConnectorId::Primary {
            return Ok(());
        }

        for key in self.store.scan_prefix(&self.config.err_mark_prefix(c)).await? {
            self.store.delete(&key).await?;
        }

        self.store
            .set(
                &self.config.key_connector,
                ConnectorId::Primary.as_str(),
                Ttl::None,
            )
            .await?;

        tracing::info!(connector = %c, "recovered to PRIMARY");
        self.emit_recovery_alert().await;

        Ok(())
    }

    async fn arm_lock(&self) -> Result<(), StoreError> {
        self.store
            .set(
                &self.config.key_lock_time,
                "1",
                Ttl::Millis(self.config.lock_ttl_ms),
            )
            .await
    }

    /// Best-effort alert dedup guard (`spec.md` §9): checks a short-TTL
    /// marker before sending and arms it right after, so a single replica
    /// processing a burst of calls around the same edge does not page twice.
    /// Two replicas racing the same edge can still both pass the check — the
    /// spec explicitly allows at-least-once delivery under races.
    async fn should_suppress_alert(&self, edge: &str, connector: ConnectorId) -> bool {
        let key = self.config.alerted_key(edge, connector);
        match self.store.exists(&key).await {
            Ok(true) => {
                tracing::debug!(edge, connector = %connector, "alert suppressed by dedup guard");
                true
            }
            Ok(false) => {
                if let Err(err) = self
                    .store
                    .set(&key, "1", Ttl::Millis(self.config.alert_dedup_ttl_ms))
                    .await
                {
                    tracing::warn!(error = %err, "failed to arm alert dedup guard");
                }
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "alert dedup guard read failed; sending anyway");
                false
            }
        }
    }

    async fn emit_trip_alert(&self, source: ConnectorId, message: &str) {
        if self.should_suppress_alert("trip", source).await {
            return;
        }
        if let Err(err) = self.alert.send_error_alert(source.as_str(), message).await {
            tracing::warn!(error = %err, "error alert delivery failed");
        }
    }

    async fn emit_recovery_alert(&self) {
        if self.should_suppress_alert("recovery", ConnectorId::Primary).await {
            return;
        }
        if let Err(err) = self.alert.send_recovery_alert(ConnectorId::Primary.as_str()).await {
            tracing::warn!(error = %err, "recovery alert delivery failed");
        }
    }
}
