use std::future::Future;
use std::sync::Arc;

use crate::connector::{CallOutcome, Connector, ConnectorId, TransportError};
use crate::controller::FailoverController;
use crate::error::ControllerError;

/// Stateless entry point business logic is expected to call instead of
/// touching the shared state store or [`FailoverController`] directly.
///
/// `Dispatcher` adds nothing to the controller's own `invoke` beyond being
/// the one blessed call site: it exists so "business logic never mutates
/// shared state directly" (`spec.md` §4.4) is a property of the API surface,
/// not just a convention callers have to remember.
#[derive(Clone)]
pub struct Dispatcher {
    controller: Arc<FailoverController>,
}

impl Dispatcher {
    pub fn new(controller: Arc<FailoverController>) -> Self {
        Self { controller }
    }

    /// Read-only observation of the current route.
    pub async fn now_connect(&self) -> ConnectorId {
        self.controller.now_connect().await
    }

    /// Runs `op` against the connector selected for this call.
    ///
    /// - `pin`, if set, forces a specific connector and bypasses selection
    ///   entirely (used by operations only meaningful against one venue, e.g.
    ///   withdrawal records held on the primary).
    /// - `need_standby_reroute` only matters when `RoutingState` is STANDBY
    ///   and the cooldown lock has expired: `true` opts into trying PRIMARY
    ///   again optimistically, `false` stays on STANDBY until a successful
    ///   call flips `RoutingState` back.
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
        self.controller.invoke(op, pin, need_standby_reroute).await
    }
}
