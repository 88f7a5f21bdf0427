use thiserror::Error;

use crate::connector::{CallOutcome, TransportError};
use crate::store::StoreError;

/// Error surfaced by [`crate::dispatcher::Dispatcher::invoke`].
///
/// One variant per taxonomy entry in `spec.md` §7 that can actually reach a
/// caller (alert-emission failures and cooldown gating never do — they are
/// logged-and-dropped and silent-no-op respectively, by design).
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The connector never produced a `CallOutcome` (timeout, connection
    /// reset, ...). No counters were touched.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The shared state store failed while selecting a connector. Per
    /// `spec.md` §7, this case never reaches here: `select` fails open to
    /// PRIMARY on a store read error instead of raising. Kept as a variant so
    /// a `StateStore` implementation that wants to surface read failures for
    /// observability (without breaking the fail-open contract) has somewhere
    /// to put them.
    #[error("state store error while selecting a connector: {0}")]
    Select(#[source] StoreError),

    /// An ordinary business rejection (non-system-abnormal failure code).
    /// Counters are untouched; this exists purely to give the caller the
    /// outcome.
    #[error("business rejection from {}: {}", .0.origin, .0.failure_code)]
    BusinessRejected(CallOutcome),

    /// A system-abnormal outcome. Always carries the outcome; additionally
    /// carries the bookkeeping error if updating the sliding failure window
    /// itself failed (the caller needs to know both: the call failed *and*
    /// our own accounting might now be stale).
    #[error(
        "system-abnormal failure from {}: {}{}",
        .outcome.origin,
        .outcome.failure_code,
        .bookkeeping.as_ref().map(|e| format!(" (bookkeeping also failed: {e})")).unwrap_or_default()
    )]
    SystemAbnormal {
        outcome: CallOutcome,
        bookkeeping: Option<StoreError>,
    },

    /// The call succeeded, but recovering the failure-count bookkeeping
    /// (clearing marks / flipping `RoutingState`) failed.
    #[error("recovery bookkeeping failed after a successful call: {0}")]
    Recovery(#[source] StoreError),
}
