//! Read-side business logic.
//!
//! Everything in this module is a pure transform over a snapshot of the
//! flight collection: status derivation, view filtering/sorting, and the
//! dashboard aggregation. Safe to recompute at any time, including while a
//! toggle is in flight.

pub mod aggregate;
pub mod status;
pub mod view;


pub use aggregate::{
    count_for_steps, dashboard_feed, department_counts, global_counts, CountMode,
    DepartmentSummary, StatusCounts,
};
pub use status::{department_status, derive_status, overall_status, Status};
pub use view::{
    apply_view, apply_view_on, DateFilter, SortConfig, SortDirection, SortKey, StatusFilter,
    ViewConfig,
};
