//! Property tests for the two structural invariants from `spec.md` §8 that
//! must hold after *any* single outcome, for *any* sequence of outcomes:
//!
//! - the lock is never observed to be STANDBY-with-no-lock-permission
//!   violated, i.e. `RoutingState = PRIMARY` and `CooldownLock` present never
//!   coexist immediately after processing one outcome;
//! - ordinary (non-system-abnormal) business failures never perturb
//!   `RoutingState` or the sliding failure-mark count, for any number of them
//!   in any order.
//!
//! Each case drives a fresh fixture through a randomized sequence of
//! outcomes (connector, success/system-abnormal/ordinary-failure, and a
//! random `ManualClock` advance between steps) and checks the invariant after
//! every single step, not just at the end.

mod common;

use common::build_fixture;
use failover_core::connector::{CallOutcome, ConnectorId};
use failover_core::store::StateStore;
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum ScriptedOutcome {
    Success,
    SystemAbnormal,
    OrdinaryFailure,
}

fn connector_strategy() -> impl Strategy<Value = ConnectorId> {
    prop_oneof![Just(ConnectorId::Primary), Just(ConnectorId::Standby)]
}

fn outcome_strategy() -> impl Strategy<Value = ScriptedOutcome> {
    prop_oneof![
        Just(ScriptedOutcome::Success),
        Just(ScriptedOutcome::SystemAbnormal),
        Just(ScriptedOutcome::OrdinaryFailure),
    ]
}

fn step_strategy() -> impl Strategy<Value = (ConnectorId, ScriptedOutcome, u64)> {
    (connector_strategy(), outcome_strategy(), 0u64..5_000)
}

fn call_outcome(origin: ConnectorId, scripted: ScriptedOutcome) -> CallOutcome {
    match scripted {
        ScriptedOutcome::Success => CallOutcome::success(origin, Vec::new()),
        ScriptedOutcome::SystemAbnormal => CallOutcome::failure(origin, "SYS_ABNORMAL"),
        ScriptedOutcome::OrdinaryFailure => CallOutcome::failure(origin, "INSUFFICIENT_BALANCE"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// `RoutingState = PRIMARY` and `CooldownLock` present never coexist
    /// immediately after processing a single outcome.
    #[test]
    fn lock_implies_standby_after_every_outcome(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let f = build_fixture();

            for (connector, scripted, delay_ms) in steps {
                f.clock.advance(delay_ms);
                let outcome = call_outcome(connector, scripted);
                let _ = f
                    .controller
                    .invoke(|_id, _c| async move { Ok(outcome) }, None, false)
                    .await;

                let routing_is_primary = f.controller.now_connect().await == ConnectorId::Primary;
                let lock_present = f.store.exists("exchange:lockTime").await.unwrap();
                prop_assert!(!(routing_is_primary && lock_present));
            }
        });
    }

    /// Ordinary business failures never perturb `RoutingState` or any
    /// connector's live `FailureMark` count, regardless of how many occur or
    /// in what order, or what other outcomes surround them.
    #[test]
    fn ordinary_failures_are_counter_neutral(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let f = build_fixture();

            for (connector, scripted, delay_ms) in steps {
                f.clock.advance(delay_ms);

                let routing_before = f.controller.now_connect().await;
                let primary_marks_before = f
                    .store
                    .scan_prefix("exchange:errTime:PRIMARY:")
                    .await
                    .unwrap()
                    .len();
                let standby_marks_before = f
                    .store
                    .scan_prefix("exchange:errTime:STANDBY:")
                    .await
                    .unwrap()
                    .len();

                let outcome = call_outcome(connector, scripted);
                let _ = f
                    .controller
                    .invoke(|_id, _c| async move { Ok(outcome) }, None, false)
                    .await;

                if matches!(scripted, ScriptedOutcome::OrdinaryFailure) {
                    let routing_after = f.controller.now_connect().await;
                    let primary_marks_after = f
                        .store
                        .scan_prefix("exchange:errTime:PRIMARY:")
                        .await
                        .unwrap()
                        .len();
                    let standby_marks_after = f
                        .store
                        .scan_prefix("exchange:errTime:STANDBY:")
                        .await
                        .unwrap()
                        .len();

                    prop_assert_eq!(routing_before, routing_after);
                    prop_assert_eq!(primary_marks_before, primary_marks_after);
                    prop_assert_eq!(standby_marks_before, standby_marks_after);
                }
            }
        });
    }
}
