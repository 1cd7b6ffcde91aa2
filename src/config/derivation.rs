//! Catalog codes the derivation engine writes its quantities to.
//!
//! Each derived quantity (door leaf area, window glass area, hinge count, ...)
//! lands on one unit-price code. The defaults follow the public works unit
//! price book; a `[derivation]` table in the config file overrides any of them.

use serde::Deserialize;

/// Code, description and unit of one derived quantity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DerivedItemSpec {
    /// Catalog code the quantity is written to
    pub code: String,
    /// Description used when the item is shown
    pub description: String,
    /// Unit symbol
    pub unit: String,
}

impl DerivedItemSpec {
    fn new(code: &str, description: &str, unit: &str) -> Self {
        Self {
            code: code.to_string(),
            description: description.to_string(),
            unit: unit.to_string(),
        }
    }
}

/// Code table for every derived quantity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DerivationCodes {
    /// Door leaf area (m²)
    pub door_leaf: DerivedItemSpec,
    /// Frame and trim area (m²)
    pub door_frame: DerivedItemSpec,
    /// Locks, one per door
    pub door_lock: DerivedItemSpec,
    /// Hinges, three per leaf
    pub door_hinge: DerivedItemSpec,
    /// Handle sets, one per door
    pub door_handle: DerivedItemSpec,
    /// Door stops, one per door
    pub door_stop: DerivedItemSpec,
    /// PVC profile weight (kg)
    pub pvc_profile: DerivedItemSpec,
    /// Aluminum profile weight (kg)
    pub aluminum_profile: DerivedItemSpec,
    /// Glass area after the frame deduction (m²)
    pub glass: DerivedItemSpec,
    /// Window handles, one per window
    pub window_handle: DerivedItemSpec,
    /// Window hinges, three per sash
    pub window_hinge: DerivedItemSpec,
}

impl Default for DerivationCodes {
    fn default() -> Self {
        Self {
            door_leaf: DerivedItemSpec::new(
                "15.375.1004",
                "Laminat kaplı ahşap kapı kanadı",
                "m²",
            ),
            door_frame: DerivedItemSpec::new(
                "15.375.1101",
                "Ahşap kapı kasası ve pervazı (34 cm açınım)",
                "m²",
            ),
            door_lock: DerivedItemSpec::new("15.380.1001", "Kapı kilidi", "Adet"),
            door_hinge: DerivedItemSpec::new("15.380.1002", "Kapı menteşesi", "Adet"),
            door_handle: DerivedItemSpec::new("15.380.1003", "Kapı kolu", "Adet"),
            door_stop: DerivedItemSpec::new("15.380.1004", "Kapı stoperi", "Adet"),
            pvc_profile: DerivedItemSpec::new(
                "15.455.1002",
                "PVC pencere profili ile doğrama yapılması",
                "kg",
            ),
            aluminum_profile: DerivedItemSpec::new(
                "15.460.1003",
                "Alüminyum profil ile doğrama yapılması",
                "kg",
            ),
            glass: DerivedItemSpec::new("15.480.1101", "Isıcam (4+12+4 mm)", "m²"),
            window_handle: DerivedItemSpec::new("15.455.1101", "Pencere kolu", "Adet"),
            window_hinge: DerivedItemSpec::new("15.455.1102", "Pencere menteşesi", "Adet"),
        }
    }
}
