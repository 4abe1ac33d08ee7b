//! In-memory flight store for unit tests and local development.
//!
//! Mirrors the remote store's observable behavior: it applies step patches
//! to its own copy of the collection and can be told to fail the next call,
//! which is how tests simulate network faults.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

use crate::api::{FlightId, LoginOutcome, StepIndex, StepUpdate};
use crate::models::FlightRecord;

use super::error::{StoreError, StoreResult};
use super::FlightStore;

/// Failure to inject on the next matching call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
    Transport,
    ServerError,
    Timeout,
}

impl InjectedFailure {
    fn to_error(self) -> StoreError {
        match self {
            InjectedFailure::Transport => StoreError::Transport("injected".to_string()),
            InjectedFailure::ServerError => StoreError::Status {
                status: 500,
                body: "injected".to_string(),
            },
            InjectedFailure::Timeout => StoreError::Timeout(Duration::from_secs(10)),
        }
    }
}

#[derive(Default)]
struct LocalState {
    flights: Vec<FlightRecord>,
    patches: Vec<(FlightId, StepIndex, StepUpdate)>,
    fail_next_fetch: Option<InjectedFailure>,
    fail_next_patch: Option<InjectedFailure>,
}

/// In-memory store implementation.
#[derive(Default)]
pub struct LocalFlightStore {
    state: Mutex<LocalState>,
    admin_password: String,
}

impl LocalFlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flights(flights: Vec<FlightRecord>) -> Self {
        LocalFlightStore {
            state: Mutex::new(LocalState {
                flights,
                ..Default::default()
            }),
            admin_password: String::new(),
        }
    }

    pub fn with_admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = password.into();
        self
    }

    /// Replace the whole collection (simulates an out-of-band import).
    pub fn set_flights(&self, flights: Vec<FlightRecord>) {
        self.state.lock().flights = flights;
    }

    /// Fail the next `fetch_flights` call.
    pub fn fail_next_fetch(&self, failure: InjectedFailure) {
        self.state.lock().fail_next_fetch = Some(failure);
    }

    /// Fail the next `patch_step` call.
    pub fn fail_next_patch(&self, failure: InjectedFailure) {
        self.state.lock().fail_next_patch = Some(failure);
    }

    /// Patches received so far, in call order.
    pub fn recorded_patches(&self) -> Vec<(FlightId, StepIndex, StepUpdate)> {
        self.state.lock().patches.clone()
    }

    /// Current store-side copy of one flight.
    pub fn flight(&self, id: FlightId) -> Option<FlightRecord> {
        self.state.lock().flights.iter().find(|f| f.id == id).cloned()
    }
}

#[async_trait]
impl FlightStore for LocalFlightStore {
    async fn fetch_flights(&self) -> StoreResult<Vec<FlightRecord>> {
        let mut state = self.state.lock();
        if let Some(failure) = state.fail_next_fetch.take() {
            return Err(failure.to_error());
        }
        Ok(state.flights.clone())
    }

    async fn patch_step(
        &self,
        id: FlightId,
        step: StepIndex,
        update: &StepUpdate,
    ) -> StoreResult<()> {
        let mut state = self.state.lock();
        if let Some(failure) = state.fail_next_patch.take() {
            return Err(failure.to_error());
        }

        let Some(flight) = state.flights.iter_mut().find(|f| f.id == id) else {
            return Err(StoreError::Status {
                status: 404,
                body: format!("no member with id {id}"),
            });
        };

        flight.set_step(step, update.value);
        if update.comment.is_some() {
            flight.set_comment(step, update.comment.clone());
        }
        if update.worker_sign.is_some() {
            flight.worker_sign = update.worker_sign.clone();
        }
        if update.checker_sign.is_some() {
            flight.checker_sign = update.checker_sign.clone();
        }
        if update.meal_carts.is_some() {
            flight.meal_carts = update.meal_carts;
        }
        if update.equipment_carts.is_some() {
            flight.equipment_carts = update.equipment_carts;
        }
        if update.glass_carts.is_some() {
            flight.glass_carts = update.glass_carts;
        }
        if update.linen_carts.is_some() {
            flight.linen_carts = update.linen_carts;
        }

        state.patches.push((id, step, update.clone()));
        Ok(())
    }

    async fn admin_login(&self, password: &str) -> StoreResult<LoginOutcome> {
        if !self.admin_password.is_empty() && password == self.admin_password {
            Ok(LoginOutcome {
                success: true,
                message: None,
            })
        } else {
            Ok(LoginOutcome {
                success: false,
                message: Some("wrong password".to_string()),
            })
        }
    }

    async fn upload_roster_csv(&self, _filename: &str, bytes: Vec<u8>) -> StoreResult<()> {
        if bytes.is_empty() {
            return Err(StoreError::Status {
                status: 400,
                body: "empty file".to_string(),
            });
        }
        Ok(())
    }
}
