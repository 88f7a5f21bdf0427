//! Test/demo stubs maintained alongside the library, so integration tests and
//! the `failover-demo` binary do not each reinvent a mock clock and a mock
//! connector. Mirrors `spark-core::test_stubs`'s role in the teacher
//! workspace: a single, officially-maintained place for the small fakes
//! tests keep needing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::clock::Clock;
use crate::connector::{CallOutcome, Connector, ConnectorId};

/// Clock whose `now_ms()` only moves when [`ManualClock::advance`] is called.
///
/// Lets scenario and property tests express "10 seconds pass with no
/// further failures" as `clock.advance(10_000)` instead of an actual sleep.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, delta_ms: u64) {
        self.millis.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.millis.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// A connector whose outcomes are scripted by the test, with a
/// caller-supplied `is_system_abnormal` classifier.
///
/// Tests push outcomes with [`MockConnector::push`] and consume them in FIFO
/// order from the closure passed to `Dispatcher::invoke`/`FailoverController::invoke`;
/// the connector itself does not decide what to return, it only classifies
/// failure codes and remembers which id it is bound to.
pub struct MockConnector {
    id: ConnectorId,
    abnormal_codes: Vec<String>,
    outcomes: Mutex<Vec<CallOutcome>>,
}

impl MockConnector {
    pub fn new(id: ConnectorId, abnormal_codes: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            id,
            abnormal_codes: abnormal_codes.into_iter().map(str::to_owned).collect(),
            outcomes: Mutex::new(Vec::new()),
        }
    }

    /// Queues an outcome to be returned by the next `pop`.
    pub fn push(&self, outcome: CallOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }

    /// Pops the next queued outcome, oldest first. Panics if the test forgot
    /// to queue one — a bare `unwrap` here would blame the wrong line.
    pub fn pop(&self) -> CallOutcome {
        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            panic!("MockConnector: no outcome queued for this call");
        }
        outcomes.remove(0)
    }
}

#[async_trait]
impl Connector for MockConnector {
    fn id(&self) -> ConnectorId {
        self.id
    }

    fn is_system_abnormal(&self, failure_code: &str) -> bool {
        self.abnormal_codes.iter().any(|code| code == failure_code)
    }
}
