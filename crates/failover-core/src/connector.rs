use async_trait::async_trait;
use core::fmt;

/// Identity of one of the two upstream venue connectors.
///
/// # Contract
/// - Stable for the lifetime of the process: a `FailoverController` binds
///   exactly one connector instance to each variant at construction time and
///   never rebinds it.
/// - Used both as the routing decision and as the key-space discriminator for
///   `FailureMark` entries (`K_err:<connector>:<ms>`), so its `Display`
///   representation is also the wire representation stored in the shared
///   state store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectorId {
    Primary,
    Standby,
}

impl ConnectorId {
    /// The value written to / compared against `K_connector`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ConnectorId::Primary => "PRIMARY",
            ConnectorId::Standby => "STANDBY",
        }
    }

    /// Parses a `K_connector` value. Anything other than the literal STANDBY
    /// marker — including absence, which callers represent as `None` before
    /// reaching this function — is treated as PRIMARY, matching the "absence
    /// means PRIMARY" invariant.
    pub fn from_store_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v == ConnectorId::Standby.as_str() => ConnectorId::Standby,
            _ => ConnectorId::Primary,
        }
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform result of a single connector call.
///
/// A `CallOutcome` only exists once a connector has actually produced a
/// response. A transport error (timeout, connection refused, anything that
/// never reaches the venue) is represented as an `Err` at the `Connector`
/// trait boundary instead — see [`Connector::is_system_abnormal`] for why that
/// split matters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallOutcome {
    pub success: bool,
    pub payload: Vec<u8>,
    pub failure_code: String,
    pub origin: ConnectorId,
}

impl CallOutcome {
    pub fn success(origin: ConnectorId, payload: Vec<u8>) -> Self {
        Self {
            success: true,
            payload,
            failure_code: String::new(),
            origin,
        }
    }

    pub fn failure(origin: ConnectorId, failure_code: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: Vec::new(),
            failure_code: failure_code.into(),
            origin,
        }
    }

    /// Edge policy from the connector contract: `success = true` with a
    /// non-empty failure code is still a success. Call sites should consult
    /// this rather than reading `success` directly, so the edge case lives in
    /// one place.
    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// A transport-level failure: the connector could not produce a
/// [`CallOutcome`] at all (timeout, connection reset, DNS failure, ...).
///
/// This is deliberately distinct from `CallOutcome { success: false, .. }`.
/// The controller never touches failure counters on a `TransportError` — only
/// a materialized outcome can trip or reset the sliding window.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("transport error calling {connector}: {message}")]
pub struct TransportError {
    pub connector: ConnectorId,
    pub message: String,
}

impl TransportError {
    pub fn new(connector: ConnectorId, message: impl Into<String>) -> Self {
        Self {
            connector,
            message: message.into(),
        }
    }
}

/// Uniform operation surface every upstream venue connector implements.
///
/// The business-specific operation list (klines, trades, withdrawals, ...) is
/// explicitly a caller concern, not a core concern: call sites express a
/// single operation as a closure bound to `(ConnectorId, &dyn Connector)` and
/// hand it to [`crate::dispatcher::Dispatcher::invoke`]. What the contract
/// fixes is the shape every such call must resolve to, and the one predicate
/// that distinguishes an infrastructure/venue outage from an ordinary
/// business rejection.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Which `ConnectorId` this instance is bound to. Used for logging and to
    /// tag outcomes the connector itself forgot to tag.
    fn id(&self) -> ConnectorId;

    /// Classifies a failure code as system-abnormal (infrastructure/venue
    /// outage) versus an ordinary business rejection (bad parameters,
    /// insufficient balance, ...). Must be pure: same input, same answer,
    /// every time, with no I/O. Only a `true` answer drives failure-count
    /// bookkeeping and state transitions; `false` surfaces the outcome to the
    /// caller untouched.
    fn is_system_abnormal(&self, failure_code: &str) -> bool;
}
