//! Public API surface for the checklist core.
//!
//! This file consolidates the identifier newtypes and wire-level DTOs shared
//! between the store client and the sync layer. All types derive
//! Serialize/Deserialize for JSON exchange with the flight record store.

use serde::{Deserialize, Serialize};

/// Flight record identifier (assigned by the store, immutable).
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FlightId(pub i64);

impl FlightId {
    pub fn new(value: i64) -> Self {
        FlightId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for FlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the eight completion-step slots on a flight record.
///
/// Valid indices are 1 through 8; construction is checked so the rest of the
/// crate never has to validate the range again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepIndex(u8);

impl StepIndex {
    pub const COUNT: usize = 8;

    pub const S1: StepIndex = StepIndex(1);
    pub const S2: StepIndex = StepIndex(2);
    pub const S3: StepIndex = StepIndex(3);
    pub const S4: StepIndex = StepIndex(4);
    pub const S5: StepIndex = StepIndex(5);
    pub const S6: StepIndex = StepIndex(6);
    pub const S7: StepIndex = StepIndex(7);
    pub const S8: StepIndex = StepIndex(8);

    /// All eight step slots, in order.
    pub const ALL: [StepIndex; 8] = [
        Self::S1,
        Self::S2,
        Self::S3,
        Self::S4,
        Self::S5,
        Self::S6,
        Self::S7,
        Self::S8,
    ];

    /// Checked constructor; `None` outside 1..=8.
    pub fn new(index: u8) -> Option<Self> {
        (1..=8).contains(&index).then_some(StepIndex(index))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for StepIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Partial-update body for `PATCH /api/members/{id}/complete/{step}`.
///
/// `value` is always present; everything else rides along only when a page
/// has staged it. Field names match the store's raw JSON contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepUpdate {
    /// New flag value, 0 or 1.
    pub value: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "workerSign", default, skip_serializing_if = "Option::is_none")]
    pub worker_sign: Option<String>,
    #[serde(rename = "checkerSign", default, skip_serializing_if = "Option::is_none")]
    pub checker_sign: Option<String>,
    #[serde(rename = "mealCarts", default, skip_serializing_if = "Option::is_none")]
    pub meal_carts: Option<i32>,
    #[serde(rename = "equipmentCarts", default, skip_serializing_if = "Option::is_none")]
    pub equipment_carts: Option<i32>,
    #[serde(rename = "glassCarts", default, skip_serializing_if = "Option::is_none")]
    pub glass_carts: Option<i32>,
    #[serde(rename = "linenCarts", default, skip_serializing_if = "Option::is_none")]
    pub linen_carts: Option<i32>,
}

impl StepUpdate {
    /// Update that only flips the flag, with no staged metadata.
    pub fn flag_only(value: u8) -> Self {
        StepUpdate {
            value,
            ..Default::default()
        }
    }
}

/// Outcome of the shared-password admin login call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
