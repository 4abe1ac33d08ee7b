//! Toggle/sync controller.
//!
//! Every step-flag mutation in the system goes through [`ToggleController`]:
//! compute the complement of the current flag, apply it to the board
//! optimistically (with the completion stamp when flipping to done), send
//! one atomic partial update to the store, and either settle or roll the
//! board back on failure.
//!
//! Per (flight, step) pair at most one update may be in flight. A second
//! toggle for the same pair while one is pending is rejected; callers
//! disable the control until the first one settles.

use chrono::Local;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::api::{FlightId, StepIndex, StepUpdate};
use crate::models::{completion_stamp, FlightRecord, StationPage};
use crate::store::{FlightStore, StoreError};

use super::board::FlightBoard;

/// What happens to the completion stamp when a step flips back to not-done.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum UndoStampPolicy {
    /// Clear the stamp; the display falls back to "-".
    #[default]
    Clear,
    /// Leave the stale stamp in place.
    Keep,
}

/// Page metadata staged alongside a toggle.
///
/// Captured by value when the toggle fires; edits made after that instant
/// never leak into the in-flight update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagedFields {
    pub comment: Option<String>,
    pub worker_sign: Option<String>,
    pub checker_sign: Option<String>,
    pub meal_carts: Option<i32>,
    pub equipment_carts: Option<i32>,
    pub glass_carts: Option<i32>,
    pub linen_carts: Option<i32>,
}

impl StagedFields {
    fn into_update(self, value: u8) -> StepUpdate {
        StepUpdate {
            value,
            comment: self.comment,
            worker_sign: self.worker_sign,
            checker_sign: self.checker_sign,
            meal_carts: self.meal_carts,
            equipment_carts: self.equipment_carts,
            glass_carts: self.glass_carts,
            linen_carts: self.linen_carts,
        }
    }
}

/// Errors surfaced to the operator by the toggle protocol.
#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    #[error("an update is already pending for flight {id} step {step}")]
    AlreadyPending { id: FlightId, step: StepIndex },
    #[error("unknown flight {0}")]
    UnknownFlight(FlightId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Field values a toggle overwrote, kept for rollback.
///
/// Only fields this toggle actually wrote are captured, so rolling back one
/// pair cannot clobber a concurrent pending toggle on a different step of
/// the same flight.
#[derive(Debug, Clone)]
struct Reverts {
    flag: u8,
    comment: Option<Option<String>>,
    worker_sign: Option<Option<String>>,
    checker_sign: Option<Option<String>>,
    meal_carts: Option<Option<i32>>,
    equipment_carts: Option<Option<i32>>,
    glass_carts: Option<Option<i32>>,
    linen_carts: Option<Option<i32>>,
    stamp: Option<(Option<String>, Option<String>)>,
}

/// Serializes step-flag mutations against the store.
pub struct ToggleController<S: FlightStore> {
    store: Arc<S>,
    board: Arc<FlightBoard>,
    pending: Mutex<HashMap<(FlightId, StepIndex), Reverts>>,
    undo_policy: UndoStampPolicy,
    patch_timeout: Duration,
}

impl<S: FlightStore> ToggleController<S> {
    pub fn new(store: Arc<S>, board: Arc<FlightBoard>) -> Self {
        ToggleController {
            store,
            board,
            pending: Mutex::new(HashMap::new()),
            undo_policy: UndoStampPolicy::default(),
            patch_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_undo_policy(mut self, policy: UndoStampPolicy) -> Self {
        self.undo_policy = policy;
        self
    }

    pub fn with_patch_timeout(mut self, timeout: Duration) -> Self {
        self.patch_timeout = timeout;
        self
    }

    pub fn board(&self) -> &Arc<FlightBoard> {
        &self.board
    }

    /// Whether a toggle is currently in flight for this pair. Pages use
    /// this to disable the checkbox while pending.
    pub fn is_pending(&self, id: FlightId, step: StepIndex) -> bool {
        self.pending.lock().contains_key(&(id, step))
    }

    /// Toggle a page's owned step.
    pub async fn toggle_page(
        &self,
        page: StationPage,
        id: FlightId,
        staged: StagedFields,
    ) -> Result<u8, ToggleError> {
        self.toggle(id, page.owned_step(), staged).await
    }

    /// Flip one step flag and synchronize it to the store.
    ///
    /// Returns the new flag value once the store acknowledged it. On any
    /// failure (transport, non-success status, timeout) the board is rolled
    /// back to the pre-toggle value and the error is returned for display;
    /// the operator may simply retry.
    pub async fn toggle(
        &self,
        id: FlightId,
        step: StepIndex,
        staged: StagedFields,
    ) -> Result<u8, ToggleError> {
        let update;
        {
            // Guard + optimistic apply under one lock so two racing callers
            // cannot both pass the pending check.
            let mut pending = self.pending.lock();
            if pending.contains_key(&(id, step)) {
                return Err(ToggleError::AlreadyPending { id, step });
            }

            let undo_policy = self.undo_policy;
            let staged_for_apply = staged.clone();
            let applied = self.board.update_record(id, |record| {
                apply_optimistic(record, step, staged_for_apply, undo_policy)
            });
            let Some((reverts, new_value)) = applied else {
                return Err(ToggleError::UnknownFlight(id));
            };

            update = staged.into_update(new_value);
            pending.insert((id, step), reverts);
        }

        let result = tokio::time::timeout(
            self.patch_timeout,
            self.store.patch_step(id, step, &update),
        )
        .await
        .unwrap_or(Err(StoreError::Timeout(self.patch_timeout)));

        let reverts = self
            .pending
            .lock()
            .remove(&(id, step))
            .unwrap_or_else(|| unreachable!("pending entry inserted above"));

        match result {
            Ok(()) => {
                info!(%id, %step, value = update.value, "step toggle settled");
                Ok(update.value)
            }
            Err(err) => {
                warn!(%id, %step, %err, "step toggle failed, rolling back");
                self.board.update_record(id, |record| {
                    revert_optimistic(record, step, reverts);
                });
                Err(ToggleError::Store(err))
            }
        }
    }

    /// Re-fetch the collection and merge it into the board.
    ///
    /// Pairs with a toggle still pending keep their optimistic values; the
    /// server row wins everywhere else.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let incoming = self.store.fetch_flights().await?;
        let pending: Vec<(FlightId, StepIndex)> = self.pending.lock().keys().copied().collect();
        self.board.absorb_refresh(incoming, &pending);
        Ok(())
    }
}

/// Flip the flag and stage metadata on the local record, returning what was
/// overwritten and the new flag value.
fn apply_optimistic(
    record: &mut FlightRecord,
    step: StepIndex,
    staged: StagedFields,
    undo_policy: UndoStampPolicy,
) -> (Reverts, u8) {
    let previous = record.step(step);
    let new_value = if previous == 1 { 0 } else { 1 };

    let mut reverts = Reverts {
        flag: previous,
        comment: None,
        worker_sign: None,
        checker_sign: None,
        meal_carts: None,
        equipment_carts: None,
        glass_carts: None,
        linen_carts: None,
        stamp: None,
    };

    record.set_step(step, new_value);

    if let Some(comment) = staged.comment {
        reverts.comment = Some(record.comment(step).map(str::to_string));
        record.set_comment(step, Some(comment));
    }
    if let Some(sign) = staged.worker_sign {
        reverts.worker_sign = Some(record.worker_sign.take());
        record.worker_sign = Some(sign);
    }
    if let Some(sign) = staged.checker_sign {
        reverts.checker_sign = Some(record.checker_sign.take());
        record.checker_sign = Some(sign);
    }
    if let Some(count) = staged.meal_carts {
        reverts.meal_carts = Some(record.meal_carts);
        record.meal_carts = Some(count);
    }
    if let Some(count) = staged.equipment_carts {
        reverts.equipment_carts = Some(record.equipment_carts);
        record.equipment_carts = Some(count);
    }
    if let Some(count) = staged.glass_carts {
        reverts.glass_carts = Some(record.glass_carts);
        record.glass_carts = Some(count);
    }
    if let Some(count) = staged.linen_carts {
        reverts.linen_carts = Some(record.linen_carts);
        record.linen_carts = Some(count);
    }

    if new_value == 1 {
        let (date, time) = completion_stamp(Local::now().naive_local());
        reverts.stamp = Some((record.complete_date.take(), record.complete_time.take()));
        record.complete_date = Some(date);
        record.complete_time = Some(time);
    } else if undo_policy == UndoStampPolicy::Clear {
        reverts.stamp = Some((record.complete_date.take(), record.complete_time.take()));
    }

    (reverts, new_value)
}

/// Undo exactly the writes recorded by `apply_optimistic`.
fn revert_optimistic(record: &mut FlightRecord, step: StepIndex, reverts: Reverts) {
    record.set_step(step, reverts.flag);
    if let Some(comment) = reverts.comment {
        record.set_comment(step, comment);
    }
    if let Some(sign) = reverts.worker_sign {
        record.worker_sign = sign;
    }
    if let Some(sign) = reverts.checker_sign {
        record.checker_sign = sign;
    }
    if let Some(count) = reverts.meal_carts {
        record.meal_carts = count;
    }
    if let Some(count) = reverts.equipment_carts {
        record.equipment_carts = count;
    }
    if let Some(count) = reverts.glass_carts {
        record.glass_carts = count;
    }
    if let Some(count) = reverts.linen_carts {
        record.linen_carts = count;
    }
    if let Some((date, time)) = reverts.stamp {
        record.complete_date = date;
        record.complete_time = time;
    }
}
