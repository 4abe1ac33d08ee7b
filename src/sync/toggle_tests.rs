use std::sync::Arc;
use std::time::Duration;

use crate::api::{FlightId, StepIndex};
use crate::models::{FlightRecord, StationPage};
use crate::store::local::InjectedFailure;
use crate::store::{FlightStore, LocalFlightStore};
use crate::sync::board::FlightBoard;
use crate::sync::toggle::{StagedFields, ToggleController, ToggleError, UndoStampPolicy};

fn flight(id: i64) -> FlightRecord {
    FlightRecord {
        id: FlightId::new(id),
        flight_number: format!("EY{id:04}"),
        departure_date: "2026-08-30".to_string(),
        ..Default::default()
    }
}

fn controller(
    flights: Vec<FlightRecord>,
) -> (Arc<LocalFlightStore>, ToggleController<LocalFlightStore>) {
    let store = Arc::new(LocalFlightStore::with_flights(flights.clone()));
    let board = Arc::new(FlightBoard::with_flights(flights));
    let ctrl = ToggleController::new(Arc::clone(&store), board);
    (store, ctrl)
}

#[tokio::test]
async fn toggle_computes_complement_and_settles() {
    let (store, ctrl) = controller(vec![flight(1)]);

    let new_value = ctrl
        .toggle(FlightId::new(1), StepIndex::S1, StagedFields::default())
        .await
        .unwrap();
    assert_eq!(new_value, 1);

    // Local board and store agree.
    let local = ctrl.board().get(FlightId::new(1)).unwrap();
    assert_eq!(local.step(StepIndex::S1), 1);
    assert_eq!(
        store.flight(FlightId::new(1)).unwrap().step(StepIndex::S1),
        1
    );

    // Toggling again flips back to 0.
    let new_value = ctrl
        .toggle(FlightId::new(1), StepIndex::S1, StagedFields::default())
        .await
        .unwrap();
    assert_eq!(new_value, 0);
}

#[tokio::test]
async fn completion_stamp_is_applied_optimistically_and_cleared_on_undo() {
    let (_store, ctrl) = controller(vec![flight(1)]);

    ctrl.toggle(FlightId::new(1), StepIndex::S2, StagedFields::default())
        .await
        .unwrap();
    let record = ctrl.board().get(FlightId::new(1)).unwrap();
    assert!(record.complete_date.is_some());
    assert!(record.complete_time.is_some());

    ctrl.toggle(FlightId::new(1), StepIndex::S2, StagedFields::default())
        .await
        .unwrap();
    let record = ctrl.board().get(FlightId::new(1)).unwrap();
    assert!(record.complete_date.is_none());
    assert!(record.complete_time.is_none());
}

#[tokio::test]
async fn keep_policy_leaves_stale_stamp() {
    let flights = vec![flight(1)];
    let store = Arc::new(LocalFlightStore::with_flights(flights.clone()));
    let board = Arc::new(FlightBoard::with_flights(flights));
    let ctrl = ToggleController::new(store, board).with_undo_policy(UndoStampPolicy::Keep);

    ctrl.toggle(FlightId::new(1), StepIndex::S2, StagedFields::default())
        .await
        .unwrap();
    ctrl.toggle(FlightId::new(1), StepIndex::S2, StagedFields::default())
        .await
        .unwrap();
    let record = ctrl.board().get(FlightId::new(1)).unwrap();
    assert!(record.complete_date.is_some());
}

#[tokio::test]
async fn staged_fields_ride_along_with_the_patch() {
    let (store, ctrl) = controller(vec![flight(1)]);

    let staged = StagedFields {
        comment: Some("galley restocked".to_string()),
        meal_carts: Some(4),
        ..Default::default()
    };
    ctrl.toggle_page(StationPage::PickConsumables, FlightId::new(1), staged)
        .await
        .unwrap();

    let patches = store.recorded_patches();
    assert_eq!(patches.len(), 1);
    let (id, step, update) = &patches[0];
    assert_eq!(*id, FlightId::new(1));
    assert_eq!(*step, StepIndex::S5);
    assert_eq!(update.value, 1);
    assert_eq!(update.comment.as_deref(), Some("galley restocked"));
    assert_eq!(update.meal_carts, Some(4));
}

#[tokio::test]
async fn failure_rolls_back_to_previous_value() {
    let (store, ctrl) = controller(vec![flight(1)]);
    store.fail_next_patch(InjectedFailure::ServerError);

    let staged = StagedFields {
        comment: Some("doomed".to_string()),
        ..Default::default()
    };
    let err = ctrl
        .toggle(FlightId::new(1), StepIndex::S1, staged)
        .await
        .unwrap_err();
    assert!(matches!(err, ToggleError::Store(_)));

    // Visible value reverted, stamp and comment gone, store untouched.
    let record = ctrl.board().get(FlightId::new(1)).unwrap();
    assert_eq!(record.step(StepIndex::S1), 0);
    assert_eq!(record.comment(StepIndex::S1), None);
    assert!(record.complete_date.is_none());
    assert_eq!(
        store.flight(FlightId::new(1)).unwrap().step(StepIndex::S1),
        0
    );

    // The pair is settled again; a retry goes through.
    assert!(!ctrl.is_pending(FlightId::new(1), StepIndex::S1));
    let new_value = ctrl
        .toggle(FlightId::new(1), StepIndex::S1, StagedFields::default())
        .await
        .unwrap();
    assert_eq!(new_value, 1);
}

#[tokio::test]
async fn rollback_restores_only_this_pairs_fields() {
    let mut seeded = flight(1);
    seeded.set_step(StepIndex::S6, 1);
    seeded.set_comment(StepIndex::S6, Some("kept".to_string()));
    let (store, ctrl) = controller(vec![seeded]);
    store.fail_next_patch(InjectedFailure::Transport);

    let _ = ctrl
        .toggle(FlightId::new(1), StepIndex::S5, StagedFields::default())
        .await
        .unwrap_err();

    let record = ctrl.board().get(FlightId::new(1)).unwrap();
    assert_eq!(record.step(StepIndex::S6), 1);
    assert_eq!(record.comment(StepIndex::S6), Some("kept"));
}

#[tokio::test]
async fn unknown_flight_is_rejected_before_any_network_call() {
    let (store, ctrl) = controller(vec![flight(1)]);
    let err = ctrl
        .toggle(FlightId::new(99), StepIndex::S1, StagedFields::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ToggleError::UnknownFlight(_)));
    assert!(store.recorded_patches().is_empty());
}

#[tokio::test]
async fn timeout_counts_as_failure_and_rolls_back() {
    // A store whose patch never completes.
    struct StalledStore;

    #[async_trait::async_trait]
    impl FlightStore for StalledStore {
        async fn fetch_flights(
            &self,
        ) -> crate::store::StoreResult<Vec<FlightRecord>> {
            Ok(vec![])
        }
        async fn patch_step(
            &self,
            _id: FlightId,
            _step: StepIndex,
            _update: &crate::api::StepUpdate,
        ) -> crate::store::StoreResult<()> {
            futures::future::pending::<()>().await;
            Ok(())
        }
        async fn admin_login(
            &self,
            _password: &str,
        ) -> crate::store::StoreResult<crate::api::LoginOutcome> {
            Ok(crate::api::LoginOutcome {
                success: false,
                message: None,
            })
        }
        async fn upload_roster_csv(
            &self,
            _filename: &str,
            _bytes: Vec<u8>,
        ) -> crate::store::StoreResult<()> {
            Ok(())
        }
    }

    let board = Arc::new(FlightBoard::with_flights(vec![flight(1)]));
    let ctrl = ToggleController::new(Arc::new(StalledStore), board)
        .with_patch_timeout(Duration::from_millis(20));

    let err = ctrl
        .toggle(FlightId::new(1), StepIndex::S1, StagedFields::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ToggleError::Store(crate::store::StoreError::Timeout(_))
    ));
    let record = ctrl.board().get(FlightId::new(1)).unwrap();
    assert_eq!(record.step(StepIndex::S1), 0);
}

#[tokio::test]
async fn second_toggle_for_a_pending_pair_is_rejected() {
    // A store whose patches block until released, so a pair can be held
    // in the pending state while other calls come in.
    struct GatedStore {
        gate: tokio::sync::Semaphore,
    }

    #[async_trait::async_trait]
    impl FlightStore for GatedStore {
        async fn fetch_flights(&self) -> crate::store::StoreResult<Vec<FlightRecord>> {
            Ok(vec![])
        }
        async fn patch_step(
            &self,
            _id: FlightId,
            _step: StepIndex,
            _update: &crate::api::StepUpdate,
        ) -> crate::store::StoreResult<()> {
            let _permit = self.gate.acquire().await;
            Ok(())
        }
        async fn admin_login(
            &self,
            _password: &str,
        ) -> crate::store::StoreResult<crate::api::LoginOutcome> {
            Ok(crate::api::LoginOutcome {
                success: false,
                message: None,
            })
        }
        async fn upload_roster_csv(
            &self,
            _filename: &str,
            _bytes: Vec<u8>,
        ) -> crate::store::StoreResult<()> {
            Ok(())
        }
    }

    let store = Arc::new(GatedStore {
        gate: tokio::sync::Semaphore::new(0),
    });
    let board = Arc::new(FlightBoard::with_flights(vec![flight(1)]));
    let ctrl = Arc::new(ToggleController::new(Arc::clone(&store), board));

    let first = tokio::spawn({
        let ctrl = Arc::clone(&ctrl);
        async move {
            ctrl.toggle(FlightId::new(1), StepIndex::S1, StagedFields::default())
                .await
        }
    });
    while !ctrl.is_pending(FlightId::new(1), StepIndex::S1) {
        tokio::task::yield_now().await;
    }

    // Same pair while pending: rejected, never raced or queued.
    let err = ctrl
        .toggle(FlightId::new(1), StepIndex::S1, StagedFields::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ToggleError::AlreadyPending {
            id: FlightId(1),
            step: StepIndex::S1,
        }
    ));

    // A different step of the same flight is its own pair and goes through.
    let second = tokio::spawn({
        let ctrl = Arc::clone(&ctrl);
        async move {
            ctrl.toggle(FlightId::new(1), StepIndex::S2, StagedFields::default())
                .await
        }
    });
    while !ctrl.is_pending(FlightId::new(1), StepIndex::S2) {
        tokio::task::yield_now().await;
    }

    store.gate.add_permits(2);
    assert_eq!(first.await.unwrap().unwrap(), 1);
    assert_eq!(second.await.unwrap().unwrap(), 1);
    assert!(!ctrl.is_pending(FlightId::new(1), StepIndex::S1));
    assert!(!ctrl.is_pending(FlightId::new(1), StepIndex::S2));
}

#[tokio::test]
async fn refresh_accepts_server_values_once_settled() {
    let (store, ctrl) = controller(vec![flight(1)]);

    ctrl.toggle(FlightId::new(1), StepIndex::S1, StagedFields::default())
        .await
        .unwrap();

    // Someone else cleared the flag server-side; with nothing pending the
    // refresh takes the server row. (Pending pairs keep their optimistic
    // values; see the board refresh tests.)
    store.set_flights(vec![flight(1)]);
    ctrl.refresh().await.unwrap();
    let record = ctrl.board().get(FlightId::new(1)).unwrap();
    assert_eq!(record.step(StepIndex::S1), 0);
}

#[tokio::test]
async fn refresh_propagates_fetch_failure() {
    let (store, ctrl) = controller(vec![flight(1)]);
    store.fail_next_fetch(InjectedFailure::Transport);
    assert!(ctrl.refresh().await.is_err());
    // Board untouched.
    assert_eq!(ctrl.board().snapshot().len(), 1);
}
