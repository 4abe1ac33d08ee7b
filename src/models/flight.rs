//! Flight record model.
//!
//! `FlightRecord` mirrors one row of the remote store's `/api/members`
//! collection. Raw JSON field names are mapped into semantic names at this
//! boundary, and every optional or malformed field collapses to a default
//! instead of an error: the read side of the system must be total over
//! whatever the store returns.

use serde::{Deserialize, Deserializer, Serialize};

use crate::api::{FlightId, StepIndex};

/// Display fallback for absent descriptive values.
pub const DISPLAY_FALLBACK: &str = "-";

/// One scheduled flight-turnaround event with its eight completion flags.
///
/// Records are created and deleted out-of-band by the CSV import; this crate
/// only ever mutates flags, step metadata and the completion stamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub id: FlightId,

    #[serde(rename = "flightNumber", default)]
    pub flight_number: String,
    #[serde(default)]
    pub destination: String,
    #[serde(rename = "acversion", default)]
    pub aircraft_type: String,
    /// Registration / leg number, shown on the Wash&Pack pages.
    #[serde(rename = "ac_Reg", alias = "legNumber", default)]
    pub registration: String,
    #[serde(default)]
    pub airline: String,
    #[serde(rename = "departuredate", default)]
    pub departure_date: String,
    #[serde(rename = "departuretime", default)]
    pub departure_time: String,
    #[serde(rename = "arrivaltime", default)]
    pub arrival_time: String,
    #[serde(rename = "uploadDate", default)]
    pub upload_date: String,

    // Completion flags. The store serves numbers, but older rows carry
    // booleans or strings; everything other than an exact 1 reads as 0.
    #[serde(rename = "bool_complete1", default, deserialize_with = "flag")]
    pub step1: u8,
    #[serde(rename = "bool_complete2", default, deserialize_with = "flag")]
    pub step2: u8,
    #[serde(rename = "bool_complete3", default, deserialize_with = "flag")]
    pub step3: u8,
    #[serde(rename = "bool_complete4", default, deserialize_with = "flag")]
    pub step4: u8,
    #[serde(rename = "bool_complete5", default, deserialize_with = "flag")]
    pub step5: u8,
    #[serde(rename = "bool_complete6", default, deserialize_with = "flag")]
    pub step6: u8,
    #[serde(rename = "bool_complete7", default, deserialize_with = "flag")]
    pub step7: u8,
    #[serde(rename = "bool_complete8", default, deserialize_with = "flag")]
    pub step8: u8,

    // Per-step free-text comments.
    #[serde(rename = "comment1", default, skip_serializing_if = "Option::is_none")]
    pub comment1: Option<String>,
    #[serde(rename = "comment2", default, skip_serializing_if = "Option::is_none")]
    pub comment2: Option<String>,
    #[serde(rename = "comment3", default, skip_serializing_if = "Option::is_none")]
    pub comment3: Option<String>,
    #[serde(rename = "comment4", default, skip_serializing_if = "Option::is_none")]
    pub comment4: Option<String>,
    #[serde(rename = "comment5", default, skip_serializing_if = "Option::is_none")]
    pub comment5: Option<String>,
    #[serde(rename = "comment6", default, skip_serializing_if = "Option::is_none")]
    pub comment6: Option<String>,
    #[serde(rename = "comment7", default, skip_serializing_if = "Option::is_none")]
    pub comment7: Option<String>,
    #[serde(rename = "comment8", default, skip_serializing_if = "Option::is_none")]
    pub comment8: Option<String>,

    // Signatures (Wash&Pack equipment page).
    #[serde(rename = "workerSign", default, skip_serializing_if = "Option::is_none")]
    pub worker_sign: Option<String>,
    #[serde(rename = "checkerSign", default, skip_serializing_if = "Option::is_none")]
    pub checker_sign: Option<String>,

    // Cart counts (Pick&Pack pages).
    #[serde(rename = "mealCarts", default, skip_serializing_if = "Option::is_none")]
    pub meal_carts: Option<i32>,
    #[serde(rename = "equipmentCarts", default, skip_serializing_if = "Option::is_none")]
    pub equipment_carts: Option<i32>,
    #[serde(rename = "glassCarts", default, skip_serializing_if = "Option::is_none")]
    pub glass_carts: Option<i32>,
    #[serde(rename = "linenCarts", default, skip_serializing_if = "Option::is_none")]
    pub linen_carts: Option<i32>,

    // Completion stamp, written client-side when a step flips to done.
    #[serde(rename = "completeDate", default, skip_serializing_if = "Option::is_none")]
    pub complete_date: Option<String>,
    #[serde(rename = "completeTime", default, skip_serializing_if = "Option::is_none")]
    pub complete_time: Option<String>,
}

impl FlightRecord {
    /// Flag value for one step slot, 0 or 1.
    pub fn step(&self, step: StepIndex) -> u8 {
        match step.get() {
            1 => self.step1,
            2 => self.step2,
            3 => self.step3,
            4 => self.step4,
            5 => self.step5,
            6 => self.step6,
            7 => self.step7,
            8 => self.step8,
            _ => unreachable!("StepIndex is range-checked at construction"),
        }
    }

    pub fn set_step(&mut self, step: StepIndex, value: u8) {
        let slot = match step.get() {
            1 => &mut self.step1,
            2 => &mut self.step2,
            3 => &mut self.step3,
            4 => &mut self.step4,
            5 => &mut self.step5,
            6 => &mut self.step6,
            7 => &mut self.step7,
            8 => &mut self.step8,
            _ => unreachable!("StepIndex is range-checked at construction"),
        };
        *slot = if value == 1 { 1 } else { 0 };
    }

    pub fn comment(&self, step: StepIndex) -> Option<&str> {
        let slot = match step.get() {
            1 => &self.comment1,
            2 => &self.comment2,
            3 => &self.comment3,
            4 => &self.comment4,
            5 => &self.comment5,
            6 => &self.comment6,
            7 => &self.comment7,
            8 => &self.comment8,
            _ => unreachable!("StepIndex is range-checked at construction"),
        };
        slot.as_deref()
    }

    pub fn set_comment(&mut self, step: StepIndex, comment: Option<String>) {
        let slot = match step.get() {
            1 => &mut self.comment1,
            2 => &mut self.comment2,
            3 => &mut self.comment3,
            4 => &mut self.comment4,
            5 => &mut self.comment5,
            6 => &mut self.comment6,
            7 => &mut self.comment7,
            8 => &mut self.comment8,
            _ => unreachable!("StepIndex is range-checked at construction"),
        };
        *slot = comment;
    }

    /// Descriptive value with the display fallback applied.
    pub fn display_or_dash(value: &str) -> &str {
        if value.is_empty() {
            DISPLAY_FALLBACK
        } else {
            value
        }
    }
}

/// Lenient flag deserializer: exact 1 (number, boolean true, or "1") reads
/// as done, anything else including null as not done.
fn flag<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let done = match raw {
        Some(serde_json::Value::Number(n)) => n.as_i64() == Some(1),
        Some(serde_json::Value::Bool(b)) => b,
        Some(serde_json::Value::String(s)) => s.trim() == "1",
        _ => false,
    };
    Ok(u8::from(done))
}
