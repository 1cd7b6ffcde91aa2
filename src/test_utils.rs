//! Shared test utilities for `metraj`.
//!
//! Builders for line items, catalog rows, openings and projects with
//! sensible defaults, plus a float comparison helper.

use crate::{
    config::CatalogSeed,
    core::line_items::ManualItemDraft,
    entities::CatalogEntryModel,
    models::{DoorOpening, ItemSource, LineItem, Project, WindowMaterial, WindowOpening},
};

/// Asserts two floats agree to within a relative tolerance of 1e-9
/// (absolute 1e-9 near zero).
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

/// Creates a catalog-sourced line item.
///
/// # Defaults
/// * `code`: `"T.<id>"`
/// * `unit`: `"m²"`
/// * no tag, realized quantity, subcontractor or location
#[must_use]
pub fn catalog_item(id: &str, category: &str, unit_price: f64, quantity: f64) -> LineItem {
    LineItem {
        id: id.to_string(),
        category: category.to_string(),
        code: format!("T.{id}"),
        description: format!("Test kalemi {id}"),
        unit: "m²".to_string(),
        unit_price,
        quantity,
        source: ItemSource::Catalog,
        tag: None,
        realized_quantity: None,
        subcontractor_id: None,
        mahal: None,
    }
}

/// Creates a catalog database row without touching a database.
#[must_use]
pub fn catalog_entry(
    code: &str,
    description: &str,
    unit: &str,
    unit_price: f64,
) -> CatalogEntryModel {
    CatalogEntryModel {
        id: 1,
        code: code.to_string(),
        description: description.to_string(),
        description_folded: description.to_lowercase(),
        unit: unit.to_string(),
        unit_price,
        category: "Test".to_string(),
    }
}

/// Creates a catalog seed entry.
#[must_use]
pub fn catalog_seed(code: &str, description: &str, unit: &str, unit_price: f64) -> CatalogSeed {
    CatalogSeed {
        code: code.to_string(),
        description: description.to_string(),
        unit: unit.to_string(),
        unit_price,
        category: "Test".to_string(),
    }
}

/// Creates a valid manual item draft with the given code and price.
#[must_use]
pub fn manual_draft(code: &str, unit_price: f64) -> ManualItemDraft {
    ManualItemDraft {
        category: "Özel".to_string(),
        code: code.to_string(),
        description: "Manuel kalem".to_string(),
        unit: "Adet".to_string(),
        unit_price,
    }
}

/// Project holding the given static and architectural items.
#[must_use]
pub fn project_with_items(
    static_items: Vec<LineItem>,
    architectural_items: Vec<LineItem>,
) -> Project {
    Project {
        static_items,
        architectural_items,
        ..Project::default()
    }
}

/// Door opening in centimeters.
#[must_use]
pub fn door(width_cm: f64, height_cm: f64, count: f64) -> DoorOpening {
    DoorOpening {
        width_cm,
        height_cm,
        count,
        ..DoorOpening::default()
    }
}

/// PVC window opening in centimeters.
#[must_use]
pub fn pvc_window(width_cm: f64, height_cm: f64, count: f64) -> WindowOpening {
    WindowOpening {
        width_cm,
        height_cm,
        count,
        material: WindowMaterial::Pvc,
        ..WindowOpening::default()
    }
}

/// Aluminum window opening; `middle_register_cm > 0` adds a mullion.
#[must_use]
pub fn aluminum_window(
    width_cm: f64,
    height_cm: f64,
    middle_register_cm: f64,
    count: f64,
) -> WindowOpening {
    WindowOpening {
        width_cm,
        height_cm,
        count,
        middle_register_cm,
        material: WindowMaterial::Aluminum,
        ..WindowOpening::default()
    }
}
