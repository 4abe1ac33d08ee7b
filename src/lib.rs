//! # GGK Checklist Core
//!
//! Completion-state engine for the flight turnaround-preparation checklist.
//!
//! Three departments (Make&Pack, Pick&Pack, Wash&Pack) prepare each flight
//! through eight station pages, each owning one completion flag on the
//! flight record. This crate holds the parts of that system with real
//! invariants:
//!
//! - [`services::status`]: derive per-department and overall completion
//!   status from the raw step flags.
//! - [`services::view`]: filter and sort a snapshot of the collection for a
//!   table view.
//! - [`services::aggregate`]: roll the collection into completed/incomplete
//!   counts for the admin dashboards.
//! - [`sync`]: the shared flight board and the optimistic toggle protocol
//!   that is the only path mutating shared state.
//! - [`store`]: the client for the remote flight record store (HTTP), plus
//!   an in-memory implementation for tests.
//!
//! Routing, authentication, CSV import and chart rendering live outside this
//! crate and are reached only through the interfaces in [`store`].

pub mod api;
pub mod models;
pub mod services;
pub mod store;
pub mod sync;

pub use api::{FlightId, LoginOutcome, StepIndex, StepUpdate};
pub use models::{Department, FlightRecord, StationPage};
pub use services::{CountMode, Status, ViewConfig};
pub use store::{FlightStore, StoreConfig, StoreError};
pub use sync::{FlightBoard, StagedFields, ToggleController, ToggleError, UndoStampPolicy};
