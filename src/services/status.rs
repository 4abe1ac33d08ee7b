//! Status derivation.
//!
//! Pure mapping from a flight's raw step flags to the two-valued completion
//! status shown everywhere in the system. Recomputed on every refresh, so it
//! must stay deterministic and side-effect free.

use serde::{Deserialize, Serialize};

use crate::api::StepIndex;
use crate::models::{Department, FlightRecord};

/// Derived completion status for a flight, scoped to a set of step keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Complete,
    Incomplete,
}

impl Status {
    pub fn is_complete(&self) -> bool {
        matches!(self, Status::Complete)
    }
}

/// Derive the status of `record` over `step_keys`.
///
/// Complete iff every key's flag is exactly 1; missing flags already read as
/// 0 at the model boundary. An empty key set is vacuously Complete, which is
/// a configuration mistake to avoid, not a state to rely on.
pub fn derive_status(record: &FlightRecord, step_keys: &[StepIndex]) -> Status {
    if step_keys.iter().all(|key| record.step(*key) == 1) {
        Status::Complete
    } else {
        Status::Incomplete
    }
}

/// Department-scoped status: all of the department's flags must be 1.
pub fn department_status(record: &FlightRecord, department: Department) -> Status {
    derive_status(record, department.step_keys())
}

/// Global status: all eight flags must be 1.
pub fn overall_status(record: &FlightRecord) -> Status {
    derive_status(record, &StepIndex::ALL)
}
