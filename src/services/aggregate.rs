//! Aggregation engine for the admin dashboards.
//!
//! Rolls a snapshot of the flight collection into completed/incomplete count
//! pairs, per department and globally. The output shape is what the chart
//! and summary-table dashboards consume directly.

use serde::{Deserialize, Serialize};

use crate::api::StepIndex;
use crate::models::{Department, FlightRecord};
use crate::services::status::derive_status;

/// How completion is counted. One mode per report, never mixed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// A flight counts as one unit; complete iff its derived status is
    /// Complete over the key set. Denominator is the flight count.
    PerFlight,
    /// Every individual flag counts as one unit. Denominator is
    /// flight count x step count.
    PerStep,
}

/// Completed/incomplete pair for one scope.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub completed: usize,
    pub incomplete: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.completed + self.incomplete
    }

    /// False when the input collection was empty; the presentation layer
    /// shows a "no data" placeholder instead of an empty chart.
    pub fn has_data(&self) -> bool {
        self.total() > 0
    }

    /// Completed fraction, `None` when there is nothing to divide by.
    pub fn completion_rate(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.completed as f64 / total as f64)
    }
}

/// Per-department entry of the dashboard feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub department: Department,
    pub label: String,
    pub counts: StatusCounts,
}

/// Count completion over an explicit step-key set.
pub fn count_for_steps(
    records: &[FlightRecord],
    step_keys: &[StepIndex],
    mode: CountMode,
) -> StatusCounts {
    match mode {
        CountMode::PerFlight => {
            let completed = records
                .iter()
                .filter(|r| derive_status(r, step_keys).is_complete())
                .count();
            StatusCounts {
                completed,
                incomplete: records.len() - completed,
            }
        }
        CountMode::PerStep => {
            let completed = records
                .iter()
                .flat_map(|r| step_keys.iter().map(|key| r.step(*key)))
                .filter(|v| *v == 1)
                .count();
            StatusCounts {
                completed,
                incomplete: records.len() * step_keys.len() - completed,
            }
        }
    }
}

/// Count pair for one department.
pub fn department_counts(
    records: &[FlightRecord],
    department: Department,
    mode: CountMode,
) -> StatusCounts {
    count_for_steps(records, department.step_keys(), mode)
}

/// Global count pair across all eight step keys.
pub fn global_counts(records: &[FlightRecord], mode: CountMode) -> StatusCounts {
    count_for_steps(records, &StepIndex::ALL, mode)
}

/// One summary entry per department, in fixed department order.
pub fn dashboard_feed(records: &[FlightRecord], mode: CountMode) -> Vec<DepartmentSummary> {
    Department::ALL
        .iter()
        .map(|dept| DepartmentSummary {
            department: *dept,
            label: dept.label().to_string(),
            counts: department_counts(records, *dept, mode),
        })
        .collect()
}
