//! Door and window openings - raw dimension inputs for the derivation engine.
//!
//! Openings store only what the user measured. Areas, weights and hardware
//! counts are recomputed from these fields every time they are read.

use super::numeric::{lenient_f64, lenient_id, lenient_string};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A door opening measured in centimeters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorOpening {
    /// Unique id
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    /// Location label (room, floor, block)
    #[serde(default, deserialize_with = "lenient_string")]
    pub mahal: String,
    /// Door type shown on drawings, e.g. "K1"
    #[serde(default, deserialize_with = "lenient_string")]
    pub type_label: String,
    /// Width in centimeters
    #[serde(default, deserialize_with = "lenient_f64")]
    pub width_cm: f64,
    /// Height in centimeters
    #[serde(default, deserialize_with = "lenient_f64")]
    pub height_cm: f64,
    /// Number of identical doors
    #[serde(default, deserialize_with = "lenient_f64")]
    pub count: f64,
}

impl DoorOpening {
    /// Openings with a non-positive count take no part in any total.
    #[must_use]
    pub fn is_counted(&self) -> bool {
        self.count > 0.0
    }
}

/// Window profile material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMaterial {
    /// PVC frame
    #[default]
    Pvc,
    /// Aluminum frame
    Aluminum,
}

impl WindowMaterial {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pvc => "PVC",
            Self::Aluminum => "Alüminyum",
        }
    }
}

/// Unknown materials fall back to PVC.
fn lenient_material<'de, D>(deserializer: D) -> Result<WindowMaterial, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if s.trim().eq_ignore_ascii_case("aluminum") => WindowMaterial::Aluminum,
        _ => WindowMaterial::Pvc,
    })
}

/// A window opening measured in centimeters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowOpening {
    /// Unique id
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    /// Location label
    #[serde(default, deserialize_with = "lenient_string")]
    pub mahal: String,
    /// Window type shown on drawings
    #[serde(default, deserialize_with = "lenient_string")]
    pub type_label: String,
    /// Width in centimeters
    #[serde(default, deserialize_with = "lenient_f64")]
    pub width_cm: f64,
    /// Height in centimeters
    #[serde(default, deserialize_with = "lenient_f64")]
    pub height_cm: f64,
    /// Number of identical windows
    #[serde(default, deserialize_with = "lenient_f64")]
    pub count: f64,
    /// Middle mullion (orta kayıt) height; `0` means there is none
    #[serde(default, deserialize_with = "lenient_f64")]
    pub middle_register_cm: f64,
    /// Profile material; unknown values read as PVC
    #[serde(default, deserialize_with = "lenient_material")]
    pub material: WindowMaterial,
}

impl WindowOpening {
    /// Openings with a non-positive count take no part in any total.
    #[must_use]
    pub fn is_counted(&self) -> bool {
        self.count > 0.0
    }

    /// Selects the aluminum weight formula.
    #[must_use]
    pub fn has_mullion(&self) -> bool {
        self.middle_register_cm > 0.0
    }
}
