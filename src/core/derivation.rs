//! Geometric derivation engine.
//!
//! Converts door and window dimensions (centimeters) into the secondary
//! quantities the bill of quantities needs: leaf and frame areas, glass area,
//! profile weight by material, and hardware counts. Everything here is pure;
//! the same openings always produce the same numbers.

use crate::config::DerivationCodes;
use crate::models::{DoorOpening, WindowMaterial, WindowOpening};
use indexmap::IndexMap;

/// Developed width of the frame-and-trim strip around a door (34 cm).
pub const FRAME_STRIP_WIDTH_M: f64 = 0.34;
/// Frame deduction applied to both glass dimensions (10 cm per side).
pub const GLASS_DEDUCTION_M: f64 = 0.20;
/// Empirical factor of the PVC profile weight approximation.
pub const PVC_WEIGHT_FACTOR: f64 = 1.1;
/// Aluminum frame bar, kg per meter.
pub const ALUMINUM_FRAME_KG_PER_M: f64 = 1.596;
/// Aluminum sash bar, kg per meter.
pub const ALUMINUM_SASH_KG_PER_M: f64 = 2.186;
/// Aluminum mullion bar, kg per meter.
pub const ALUMINUM_MULLION_KG_PER_M: f64 = 2.038;
/// Sash length deduction per dimension.
const SASH_DEDUCTION_M: f64 = 0.16;
/// Mullion length deduction.
const MULLION_DEDUCTION_M: f64 = 0.2;

/// Hinges fitted to each door leaf.
pub const DOOR_HINGES_PER_LEAF: f64 = 3.0;
/// Hinges fitted to each window sash.
pub const WINDOW_HINGES_PER_SASH: f64 = 3.0;

/// A code -> quantity map produced by the engine, in first-derived order.
pub type DerivedQuantityUpdate = IndexMap<String, f64>;

fn meters(cm: f64) -> f64 {
    if cm.is_finite() { cm / 100.0 } else { 0.0 }
}

fn finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Door leaf area in m²: `width × height × count`.
#[must_use]
pub fn door_leaf_area(width_cm: f64, height_cm: f64, count: f64) -> f64 {
    meters(width_cm) * meters(height_cm) * finite(count)
}

/// Frame and trim area in m², modeled as a 34 cm strip along both jambs and the head.
#[must_use]
pub fn door_frame_area(width_cm: f64, height_cm: f64, count: f64) -> f64 {
    let (w, h) = (meters(width_cm), meters(height_cm));
    ((2.0 * h) + w) * FRAME_STRIP_WIDTH_M * finite(count)
}

/// Glass area in m² after the frame deduction; never negative.
#[must_use]
pub fn window_glass_area(width_cm: f64, height_cm: f64, count: f64) -> f64 {
    let (w, h) = (meters(width_cm), meters(height_cm));
    let net_w = w - GLASS_DEDUCTION_M;
    let net_h = h - GLASS_DEDUCTION_M;
    // no glass unless both dimensions clear the deduction
    if net_w <= 0.0 || net_h <= 0.0 {
        return 0.0;
    }
    (net_w * net_h).max(0.0) * finite(count)
}

/// PVC profile weight in kg: perimeter, doubled for inner and outer sash.
#[must_use]
pub fn pvc_profile_weight(width_cm: f64, height_cm: f64, count: f64) -> f64 {
    let (w, h) = (meters(width_cm), meters(height_cm));
    2.0 * (w + h) * PVC_WEIGHT_FACTOR * 2.0 * finite(count)
}

/// Aluminum profile weight in kg.
///
/// A middle mullion (`middle_register_cm > 0`) switches to a different
/// developed-length model that adds the mullion bar and splits the sash width.
#[must_use]
pub fn aluminum_profile_weight(
    width_cm: f64,
    height_cm: f64,
    middle_register_cm: f64,
    count: f64,
) -> f64 {
    let (w, h) = (meters(width_cm), meters(height_cm));
    let per_window = if middle_register_cm > 0.0 {
        (w * h) * 2.0 * ALUMINUM_FRAME_KG_PER_M
            + (h - MULLION_DEDUCTION_M) * ALUMINUM_MULLION_KG_PER_M
            + (((w / 2.0) - SASH_DEDUCTION_M) + (h - SASH_DEDUCTION_M))
                * 2.0
                * ALUMINUM_SASH_KG_PER_M
    } else {
        (w + h) * 2.0 * ALUMINUM_FRAME_KG_PER_M
            + ((w - SASH_DEDUCTION_M) + (h - SASH_DEDUCTION_M)) * 2.0 * ALUMINUM_SASH_KG_PER_M
    };
    per_window * finite(count)
}

/// Everything derived from one door.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DoorQuantities {
    /// Leaf area (m²)
    pub leaf_area: f64,
    /// Frame and trim area (m²)
    pub frame_area: f64,
    /// Locks
    pub lock_count: f64,
    /// Hinges
    pub hinge_count: f64,
    /// Handle sets
    pub handle_count: f64,
    /// Door stops
    pub stop_count: f64,
}

/// Derives door quantities; doors with a non-positive count yield zeros.
#[must_use]
pub fn door_quantities(door: &DoorOpening) -> DoorQuantities {
    if !door.is_counted() {
        return DoorQuantities::default();
    }
    let count = door.count;
    DoorQuantities {
        leaf_area: door_leaf_area(door.width_cm, door.height_cm, count),
        frame_area: door_frame_area(door.width_cm, door.height_cm, count),
        lock_count: count,
        hinge_count: count * DOOR_HINGES_PER_LEAF,
        handle_count: count,
        stop_count: count,
    }
}

/// Everything derived from one window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowQuantities {
    /// Glass area (m²)
    pub glass_area: f64,
    /// Profile weight for the window material (kg)
    pub profile_weight: f64,
    /// Handles
    pub handle_count: f64,
    /// Hinges
    pub hinge_count: f64,
}

/// Derives window quantities; windows with a non-positive count yield zeros.
#[must_use]
pub fn window_quantities(window: &WindowOpening) -> WindowQuantities {
    if !window.is_counted() {
        return WindowQuantities::default();
    }
    let count = window.count;
    let profile_weight = match window.material {
        WindowMaterial::Pvc => pvc_profile_weight(window.width_cm, window.height_cm, count),
        WindowMaterial::Aluminum => aluminum_profile_weight(
            window.width_cm,
            window.height_cm,
            window.middle_register_cm,
            count,
        ),
    };
    WindowQuantities {
        glass_area: window_glass_area(window.width_cm, window.height_cm, count),
        profile_weight,
        handle_count: count,
        hinge_count: count * WINDOW_HINGES_PER_SASH,
    }
}

/// Sums door quantities over all counted doors.
#[must_use]
pub fn total_door_quantities(doors: &[DoorOpening]) -> DoorQuantities {
    doors
        .iter()
        .map(door_quantities)
        .fold(DoorQuantities::default(), |acc, q| DoorQuantities {
            leaf_area: acc.leaf_area + q.leaf_area,
            frame_area: acc.frame_area + q.frame_area,
            lock_count: acc.lock_count + q.lock_count,
            hinge_count: acc.hinge_count + q.hinge_count,
            handle_count: acc.handle_count + q.handle_count,
            stop_count: acc.stop_count + q.stop_count,
        })
}

fn add(updates: &mut DerivedQuantityUpdate, code: &str, quantity: f64) {
    *updates.entry(code.to_string()).or_insert(0.0) += quantity;
}

/// Builds the code -> quantity update for all openings.
///
/// PVC and aluminum weights go to their own codes. Codes configured to the
/// same value accumulate into one entry.
#[must_use]
pub fn derive_updates(
    doors: &[DoorOpening],
    windows: &[WindowOpening],
    codes: &DerivationCodes,
) -> DerivedQuantityUpdate {
    let mut updates = DerivedQuantityUpdate::new();

    if doors.iter().any(DoorOpening::is_counted) {
        let doors = total_door_quantities(doors);
        add(&mut updates, &codes.door_leaf.code, doors.leaf_area);
        add(&mut updates, &codes.door_frame.code, doors.frame_area);
        add(&mut updates, &codes.door_lock.code, doors.lock_count);
        add(&mut updates, &codes.door_hinge.code, doors.hinge_count);
        add(&mut updates, &codes.door_handle.code, doors.handle_count);
        add(&mut updates, &codes.door_stop.code, doors.stop_count);
    }

    for window in windows.iter().filter(|w| w.is_counted()) {
        let q = window_quantities(window);
        let profile_code = match window.material {
            WindowMaterial::Pvc => &codes.pvc_profile.code,
            WindowMaterial::Aluminum => &codes.aluminum_profile.code,
        };
        add(&mut updates, profile_code, q.profile_weight);
        add(&mut updates, &codes.glass.code, q.glass_area);
        add(&mut updates, &codes.window_handle.code, q.handle_count);
        add(&mut updates, &codes.window_hinge.code, q.hinge_count);
    }

    updates
}
