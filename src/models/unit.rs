//! Measurement units accepted by the unit-price catalog.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unit of measure for a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Square meter
    #[serde(rename = "m²")]
    SquareMeter,
    /// Cubic meter
    #[serde(rename = "m³")]
    CubicMeter,
    /// Meter
    #[serde(rename = "m")]
    Meter,
    /// Kilogram
    #[serde(rename = "kg")]
    Kilogram,
    /// Metric ton
    #[serde(rename = "Ton")]
    Ton,
    /// Piece
    #[serde(rename = "Adet")]
    Piece,
    /// Hour
    #[serde(rename = "sa")]
    Hour,
    /// Kilometer
    #[serde(rename = "km")]
    Kilometer,
}

impl Unit {
    /// Symbol as written in the price book.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SquareMeter => "m²",
            Self::CubicMeter => "m³",
            Self::Meter => "m",
            Self::Kilogram => "kg",
            Self::Ton => "Ton",
            Self::Piece => "Adet",
            Self::Hour => "sa",
            Self::Kilometer => "km",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    /// Accepts the display form plus the ASCII spellings found in spreadsheets
    /// (`m2`, `m3`, `adet`, `ton`).
    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "m²" | "m2" => Ok(Self::SquareMeter),
            "m³" | "m3" => Ok(Self::CubicMeter),
            "m" | "mt" => Ok(Self::Meter),
            "kg" => Ok(Self::Kilogram),
            "ton" | "t" => Ok(Self::Ton),
            "adet" => Ok(Self::Piece),
            "sa" => Ok(Self::Hour),
            "km" => Ok(Self::Kilometer),
            _ => Err(Error::Validation {
                field: "unit",
                message: format!("unknown unit '{raw}'"),
            }),
        }
    }
}
