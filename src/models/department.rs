//! Departments, station pages and step ownership.
//!
//! Ownership of the eight completion flags is declared statically here: each
//! station page owns exactly one step slot, each department owns the union of
//! its pages' slots. Nothing in the crate infers ownership from field names.

use serde::{Deserialize, Serialize};

use crate::api::StepIndex;

/// One of the three cooperating workflow groups.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    MakeAndPack,
    PickAndPack,
    WashAndPack,
}

impl Department {
    pub const ALL: [Department; 3] = [
        Department::MakeAndPack,
        Department::PickAndPack,
        Department::WashAndPack,
    ];

    /// Step slots owned by this department, in page order.
    pub fn step_keys(&self) -> &'static [StepIndex] {
        match self {
            Department::MakeAndPack => &[StepIndex::S1, StepIndex::S2, StepIndex::S3, StepIndex::S4],
            Department::PickAndPack => &[StepIndex::S5, StepIndex::S6],
            Department::WashAndPack => &[StepIndex::S7, StepIndex::S8],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Department::MakeAndPack => "Make & Pack",
            Department::PickAndPack => "Pick & Pack",
            Department::WashAndPack => "Wash & Pack",
        }
    }
}

/// Which timetable field a page's work window is anchored to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeBasis {
    Departure,
    Arrival,
}

/// The eight operator-facing station pages, one per step slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationPage {
    /// MNP_EY_COLD
    MakeEconomyCold,
    /// MNP_BC_COLD
    MakeBusinessCold,
    /// MNP_BC_HOT
    MakeBusinessHot,
    /// MNP_EY_HOT
    MakeEconomyHot,
    /// PNP consumables
    PickConsumables,
    /// PNP_BEV
    PickBeverages,
    /// WNP serving tools
    WashServingTools,
    /// WNP_EQ
    WashEquipment,
}

impl StationPage {
    pub const ALL: [StationPage; 8] = [
        StationPage::MakeEconomyCold,
        StationPage::MakeBusinessCold,
        StationPage::MakeBusinessHot,
        StationPage::MakeEconomyHot,
        StationPage::PickConsumables,
        StationPage::PickBeverages,
        StationPage::WashServingTools,
        StationPage::WashEquipment,
    ];

    /// The single step slot this page owns.
    pub fn owned_step(&self) -> StepIndex {
        match self {
            StationPage::MakeEconomyCold => StepIndex::S1,
            StationPage::MakeBusinessCold => StepIndex::S2,
            StationPage::MakeBusinessHot => StepIndex::S3,
            StationPage::MakeEconomyHot => StepIndex::S4,
            StationPage::PickConsumables => StepIndex::S5,
            StationPage::PickBeverages => StepIndex::S6,
            StationPage::WashServingTools => StepIndex::S7,
            StationPage::WashEquipment => StepIndex::S8,
        }
    }

    pub fn department(&self) -> Department {
        match self {
            StationPage::MakeEconomyCold
            | StationPage::MakeBusinessCold
            | StationPage::MakeBusinessHot
            | StationPage::MakeEconomyHot => Department::MakeAndPack,
            StationPage::PickConsumables | StationPage::PickBeverages => Department::PickAndPack,
            StationPage::WashServingTools | StationPage::WashEquipment => Department::WashAndPack,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StationPage::MakeEconomyCold => "MNP_EY_COLD",
            StationPage::MakeBusinessCold => "MNP_BC_COLD",
            StationPage::MakeBusinessHot => "MNP_BC_HOT",
            StationPage::MakeEconomyHot => "MNP_EY_HOT",
            StationPage::PickConsumables => "PNP_CONSUMABLES",
            StationPage::PickBeverages => "PNP_BEV",
            StationPage::WashServingTools => "WNP_SERVING_TOOLS",
            StationPage::WashEquipment => "WNP_EQ",
        }
    }

    /// Timetable anchor for the page's displayed work window.
    ///
    /// Make and Pick pages prepare against departure; Wash pages turn
    /// equipment around from the inbound leg, so they anchor on arrival.
    pub fn time_basis(&self) -> TimeBasis {
        match self.department() {
            Department::MakeAndPack | Department::PickAndPack => TimeBasis::Departure,
            Department::WashAndPack => TimeBasis::Arrival,
        }
    }

    /// Hours before the anchor time at which work starts.
    pub fn start_offset_hours(&self) -> i64 {
        match self.time_basis() {
            TimeBasis::Departure => -6,
            TimeBasis::Arrival => -8,
        }
    }

    /// Whether the page renders the free-text note column.
    pub fn has_note(&self) -> bool {
        matches!(
            self,
            StationPage::MakeEconomyCold
                | StationPage::MakeBusinessCold
                | StationPage::MakeBusinessHot
                | StationPage::MakeEconomyHot
                | StationPage::WashEquipment
        )
    }

    /// Whether the page collects worker/checker signatures.
    pub fn has_signatures(&self) -> bool {
        matches!(self, StationPage::WashEquipment)
    }

    /// Whether the page collects cart counts.
    pub fn has_cart_counts(&self) -> bool {
        matches!(
            self,
            StationPage::PickConsumables | StationPage::PickBeverages
        )
    }
}
