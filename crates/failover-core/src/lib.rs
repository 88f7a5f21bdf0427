//! # failover-core
//!
//! Primary/standby failover controller for an external venue-API tier. This
//! crate sits between business logic and two independent upstream connector
//! implementations and decides, per call, which one to dispatch to.
//!
//! It observes per-call outcomes classified as system-abnormal versus
//! ordinary failures, transitions a shared routing state between PRIMARY,
//! STANDBY, and STANDBY-locked based on a sliding error budget, and recovers
//! to PRIMARY automatically once a cooldown timer has elapsed and a call
//! succeeds. Routing state and failure counters live in an external
//! [`StateStore`](store::StateStore) so multiple replicas of this crate
//! observe the same state.
//!
//! What this crate deliberately does not do: retry failed calls, replay a
//! call on the standby connector after the primary fails, persist an audit
//! log of routing decisions, or actively probe connector health. State only
//! advances on the outcome of real calls, which callers route through
//! [`Dispatcher::invoke`].
//!
//! ## Wiring it up
//!
//! ```ignore
//! let controller = Arc::new(FailoverController::new(
//!     Config::default(),
//!     store,      // an Arc<dyn StateStore>, e.g. failover_store_redis::RedisStateStore
//!     clock,      // an Arc<dyn Clock>, e.g. Arc::new(SystemClock::new())
//!     alert,      // an Arc<dyn AlertSink>, e.g. Arc::new(LoggingAlertSink)
//!     primary,    // an Arc<dyn Connector> bound to the primary venue
//!     standby,    // an Arc<dyn Connector> bound to the standby venue
//! ));
//! let dispatcher = Dispatcher::new(controller);
//!
//! let outcome = dispatcher
//!     .invoke(|_id, connector| async move { /* call the venue */ }, None, false)
//!     .await?;
//! ```

pub mod alert;
pub mod clock;
pub mod config;
pub mod connector;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod store;
pub mod test_support;

pub use alert::{AlertSink, LoggingAlertSink};
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use connector::{CallOutcome, Connector, ConnectorId, TransportError};
pub use controller::FailoverController;
pub use dispatcher::Dispatcher;
pub use error::ControllerError;
pub use store::{StateStore, StoreError, Ttl};
