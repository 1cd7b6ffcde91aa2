//! Green book (yeşil defter) assembler.
//!
//! Flattens every tracked collection into uniform ledger rows for tabular
//! display and export. Door and window rows are expanded from their
//! dimensions and pre-rounded to two decimals here; the calculation layer
//! itself never rounds.

use crate::config::{DerivationCodes, DerivedItemSpec};
use crate::core::derivation::{
    DOOR_HINGES_PER_LEAF, WINDOW_HINGES_PER_SASH, door_quantities, window_quantities,
};
use crate::models::{DoorOpening, LineItem, Project, WindowMaterial, WindowOpening, WorkList};
use serde::Serialize;
use std::fmt;

/// Placeholder for cells with no value, and the reserved deduction column.
pub const EMPTY_CELL: &str = "-";

/// Which collection a ledger row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowSource {
    /// Static line item
    #[serde(rename = "Statik")]
    Static,
    /// Architectural line item
    #[serde(rename = "Mimari")]
    Architectural,
    /// Mechanical line item
    #[serde(rename = "Mekanik")]
    Mechanical,
    /// Electrical line item
    #[serde(rename = "Elektrik")]
    Electrical,
    /// Door opening
    #[serde(rename = "Kapı")]
    Door,
    /// Window opening
    #[serde(rename = "Pencere")]
    Window,
}

impl RowSource {
    /// Turkish label used in exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Static => "Statik",
            Self::Architectural => "Mimari",
            Self::Mechanical => "Mekanik",
            Self::Electrical => "Elektrik",
            Self::Door => "Kapı",
            Self::Window => "Pencere",
        }
    }
}

impl From<WorkList> for RowSource {
    fn from(list: WorkList) -> Self {
        match list {
            WorkList::Static => Self::Static,
            WorkList::Architectural => Self::Architectural,
            WorkList::Mechanical => Self::Mechanical,
            WorkList::Electrical => Self::Electrical,
        }
    }
}

impl fmt::Display for RowSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One export-ready ledger row. Export sinks receive exactly this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreenBookRow {
    /// Collection the row came from
    pub source: RowSource,
    /// Unit-price code
    pub code: String,
    /// Item description; opening rows add location and type
    pub description: String,
    /// Unit symbol
    pub unit: String,
    /// Width in meters, or [`EMPTY_CELL`]
    pub width: String,
    /// Height in meters, or [`EMPTY_CELL`]
    pub height: String,
    /// Opening count, or [`EMPTY_CELL`] for line items
    pub count: String,
    /// Deduction column, always [`EMPTY_CELL`] for now
    pub deduction: String,
    /// Quantity carried to the item
    pub total: String,
}

/// Two-decimal cell text.
#[must_use]
pub fn format_cell(value: f64) -> String {
    format!("{value:.2}")
}

fn line_item_row(list: WorkList, item: &LineItem) -> GreenBookRow {
    GreenBookRow {
        source: list.into(),
        code: item.code.clone(),
        description: item.description.clone(),
        unit: item.unit.clone(),
        width: EMPTY_CELL.to_string(),
        height: EMPTY_CELL.to_string(),
        count: EMPTY_CELL.to_string(),
        deduction: EMPTY_CELL.to_string(),
        total: item.quantity.to_string(),
    }
}

fn opening_description(spec: &DerivedItemSpec, mahal: &str, type_label: &str) -> String {
    match (mahal.trim(), type_label.trim()) {
        ("", "") => spec.description.clone(),
        (mahal, "") => format!("{} ({mahal})", spec.description),
        ("", label) => format!("{} ({label})", spec.description),
        (mahal, label) => format!("{} ({mahal} / {label})", spec.description),
    }
}

struct OpeningRowBuilder<'a> {
    source: RowSource,
    mahal: &'a str,
    type_label: &'a str,
    width_m: f64,
    height_m: f64,
    count: f64,
}

impl OpeningRowBuilder<'_> {
    /// Row whose total follows from the measured width and height.
    fn dimensioned(&self, spec: &DerivedItemSpec, total: f64) -> GreenBookRow {
        self.row(
            spec,
            format_cell(self.width_m),
            format_cell(self.height_m),
            format_cell(self.count),
            total,
        )
    }

    /// Hardware row: a multiple of the opening count.
    fn counted(&self, spec: &DerivedItemSpec, per_opening: f64) -> GreenBookRow {
        self.row(
            spec,
            EMPTY_CELL.to_string(),
            EMPTY_CELL.to_string(),
            format_cell(self.count * per_opening),
            self.count * per_opening,
        )
    }

    fn row(
        &self,
        spec: &DerivedItemSpec,
        width: String,
        height: String,
        count: String,
        total: f64,
    ) -> GreenBookRow {
        GreenBookRow {
            source: self.source,
            code: spec.code.clone(),
            description: opening_description(spec, self.mahal, self.type_label),
            unit: spec.unit.clone(),
            width,
            height,
            count,
            deduction: EMPTY_CELL.to_string(),
            total: format_cell(total),
        }
    }
}

/// Five rows per counted door: leaf, frame, lock, handle, hinge.
#[must_use]
pub fn door_rows(door: &DoorOpening, codes: &DerivationCodes) -> Vec<GreenBookRow> {
    if !door.is_counted() {
        return Vec::new();
    }
    let q = door_quantities(door);
    let builder = OpeningRowBuilder {
        source: RowSource::Door,
        mahal: &door.mahal,
        type_label: &door.type_label,
        width_m: door.width_cm / 100.0,
        height_m: door.height_cm / 100.0,
        count: door.count,
    };
    vec![
        builder.dimensioned(&codes.door_leaf, q.leaf_area),
        builder.dimensioned(&codes.door_frame, q.frame_area),
        builder.counted(&codes.door_lock, 1.0),
        builder.counted(&codes.door_handle, 1.0),
        builder.counted(&codes.door_hinge, DOOR_HINGES_PER_LEAF),
    ]
}

/// Four rows per counted window: profile weight, glass, handle, hinge.
#[must_use]
pub fn window_rows(window: &WindowOpening, codes: &DerivationCodes) -> Vec<GreenBookRow> {
    if !window.is_counted() {
        return Vec::new();
    }
    let q = window_quantities(window);
    let profile = match window.material {
        WindowMaterial::Pvc => &codes.pvc_profile,
        WindowMaterial::Aluminum => &codes.aluminum_profile,
    };
    let builder = OpeningRowBuilder {
        source: RowSource::Window,
        mahal: &window.mahal,
        type_label: &window.type_label,
        width_m: window.width_cm / 100.0,
        height_m: window.height_cm / 100.0,
        count: window.count,
    };
    vec![
        builder.dimensioned(profile, q.profile_weight),
        builder.dimensioned(&codes.glass, q.glass_area),
        builder.counted(&codes.window_handle, 1.0),
        builder.counted(&codes.window_hinge, WINDOW_HINGES_PER_SASH),
    ]
}

/// Assembles the whole ledger: the four work lists in order, then doors, then windows.
/// Line items with a zero quantity are left out.
#[must_use]
pub fn assemble(project: &Project, codes: &DerivationCodes) -> Vec<GreenBookRow> {
    let items = project
        .all_items()
        .filter(|(_, item)| item.quantity > 0.0)
        .map(|(list, item)| line_item_row(list, item));
    let doors = project.doors.iter().flat_map(|door| door_rows(door, codes));
    let windows = project
        .windows
        .iter()
        .flat_map(|window| window_rows(window, codes));

    items.chain(doors).chain(windows).collect()
}
