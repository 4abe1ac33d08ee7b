//! Filter and sort engine for flight list views.
//!
//! Every table in the system (station pages, admin dashboard) renders through
//! `apply_view`: a pure transform from a snapshot of the collection plus a
//! view configuration to a new ordered sequence. The input is never mutated
//! and no field shape can make it fail.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::api::StepIndex;
use crate::models::{date_prefix, FlightRecord};
use crate::services::status::{derive_status, Status};

/// Completion filter over the view's configured step keys.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Complete,
    Incomplete,
}

/// Calendar-date filter against the departure date.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Tomorrow,
}

/// Columns a view can be ordered by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    FlightNumber,
    Destination,
    AircraftType,
    Registration,
    DepartureDate,
    DepartureTime,
    UploadDate,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(key: SortKey) -> Self {
        SortConfig {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Column-header click semantics: clicking the active column flips the
    /// direction, clicking a different column resets to ascending.
    pub fn toggled(current: Option<SortConfig>, key: SortKey) -> SortConfig {
        match current {
            Some(sort) if sort.key == key => SortConfig {
                key,
                direction: sort.direction.flipped(),
            },
            _ => SortConfig::ascending(key),
        }
    }
}

/// Full view configuration for one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Case-insensitive substring match on the flight number; empty matches all.
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub date_filter: DateFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortConfig>,
    /// Step keys the status filter derives against (a page's single step, a
    /// department's set, or all eight on the admin dashboard).
    #[serde(default)]
    pub step_keys: Vec<StepIndex>,
}

impl ViewConfig {
    pub fn for_steps(step_keys: Vec<StepIndex>) -> Self {
        ViewConfig {
            step_keys,
            ..Default::default()
        }
    }
}

/// Apply `view` against the local clock's today.
pub fn apply_view(records: &[FlightRecord], view: &ViewConfig) -> Vec<FlightRecord> {
    apply_view_on(records, view, Local::now().date_naive())
}

/// Apply `view` with an explicit evaluation date (tests and replays).
///
/// Filters are conjunctive; sorting runs after filtering and is stable, so
/// records comparing equal keep their fetched relative order.
pub fn apply_view_on(
    records: &[FlightRecord],
    view: &ViewConfig,
    today: NaiveDate,
) -> Vec<FlightRecord> {
    let needle = view.search_term.to_lowercase();

    let mut out: Vec<FlightRecord> = records
        .iter()
        .filter(|record| matches_search(record, &needle))
        .filter(|record| matches_status(record, view))
        .filter(|record| matches_date(record, view.date_filter, today))
        .cloned()
        .collect();

    if let Some(sort) = view.sort {
        out.sort_by(|a, b| {
            let ordering = sort_value(a, sort.key).cmp(sort_value(b, sort.key));
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    out
}

fn matches_search(record: &FlightRecord, needle: &str) -> bool {
    needle.is_empty() || record.flight_number.to_lowercase().contains(needle)
}

fn matches_status(record: &FlightRecord, view: &ViewConfig) -> bool {
    match view.status_filter {
        StatusFilter::All => true,
        StatusFilter::Complete => derive_status(record, &view.step_keys) == Status::Complete,
        StatusFilter::Incomplete => derive_status(record, &view.step_keys) == Status::Incomplete,
    }
}

fn matches_date(record: &FlightRecord, filter: DateFilter, today: NaiveDate) -> bool {
    let wanted = match filter {
        DateFilter::All => return true,
        DateFilter::Today => today,
        DateFilter::Tomorrow => today + Duration::days(1),
    };
    date_prefix(&record.departure_date) == wanted.format("%Y-%m-%d").to_string()
}

/// Column value as a string; absent values compare as the empty string.
fn sort_value(record: &FlightRecord, key: SortKey) -> &str {
    match key {
        SortKey::FlightNumber => &record.flight_number,
        SortKey::Destination => &record.destination,
        SortKey::AircraftType => &record.aircraft_type,
        SortKey::Registration => &record.registration,
        SortKey::DepartureDate => &record.departure_date,
        SortKey::DepartureTime => &record.departure_time,
        SortKey::UploadDate => &record.upload_date,
    }
}
