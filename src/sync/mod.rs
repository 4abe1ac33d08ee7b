//! Write-side state: the shared flight board and the toggle protocol.

pub mod board;
pub mod toggle;

#[cfg(test)]
#[path = "toggle_tests.rs"]
mod toggle_tests;

pub use board::FlightBoard;
pub use toggle::{StagedFields, ToggleController, ToggleError, UndoStampPolicy};
