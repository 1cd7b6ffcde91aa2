//! Line item - one priced work item (poz) with a quantity.
//!
//! All four work lists share this shape. The persisted form uses camelCase keys
//! and an `isManual` boolean; in memory the origin is the [`ItemSource`] sum type
//! so permission checks are exhaustive matches.

use super::numeric::{
    lenient_id, lenient_non_negative, lenient_option_f64, lenient_option_id,
    lenient_option_string, lenient_string,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Category bucket used when an item has no category.
pub const DEFAULT_CATEGORY: &str = "Genel";

/// Where a line item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum ItemSource {
    /// Selected from the unit-price catalog; price fields are locked.
    #[default]
    Catalog,
    /// Typed in by the user; every field is editable and the item is deletable.
    Manual,
}

impl From<bool> for ItemSource {
    fn from(is_manual: bool) -> Self {
        if is_manual { Self::Manual } else { Self::Catalog }
    }
}

impl From<ItemSource> for bool {
    fn from(source: ItemSource) -> Self {
        matches!(source, ItemSource::Manual)
    }
}

/// Accepts `true`/`false`, `"true"`, `1`/`0`; anything else is a catalog item.
fn lenient_source<'de, D>(deserializer: D) -> Result<ItemSource, D::Error>
where
    D: Deserializer<'de>,
{
    let is_manual = match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    };
    Ok(ItemSource::from(is_manual))
}

/// Optional label attached to a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemTag {
    /// Work added after the contract (ilave iş)
    Additional,
    /// Item priced with a newly agreed unit price (yeni birim fiyat)
    NewUnitPrice,
    /// Quantity revised during the works
    Revised,
}

/// Unknown labels are dropped instead of failing the whole item.
fn lenient_tag<'de, D>(deserializer: D) -> Result<Option<ItemTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// The top-level list an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkList {
    /// Structural works (statik)
    Static,
    /// Architectural works (mimari)
    Architectural,
    /// Mechanical installation (mekanik)
    Mechanical,
    /// Electrical installation (elektrik)
    Electrical,
}

impl WorkList {
    /// All lists in report order.
    pub const ALL: [Self; 4] = [
        Self::Static,
        Self::Architectural,
        Self::Mechanical,
        Self::Electrical,
    ];

    /// Turkish display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Static => "Statik",
            Self::Architectural => "Mimari",
            Self::Mechanical => "Mekanik",
            Self::Electrical => "Elektrik",
        }
    }
}

impl fmt::Display for WorkList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A priced work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique id
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    /// Grouping category; blank falls back to [`DEFAULT_CATEGORY`]
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    /// Unit-price code (poz no)
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    /// Item description
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Unit symbol
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: String,
    /// Unit price in lira
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub unit_price: f64,
    /// Contract quantity
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub quantity: f64,
    /// Catalog or manual origin, persisted as `isManual`
    #[serde(rename = "isManual", default, deserialize_with = "lenient_source")]
    pub source: ItemSource,
    /// Optional label; unknown labels read as none
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_tag"
    )]
    pub tag: Option<ItemTag>,
    /// Quantity actually built; `None` until measured on site
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_option_f64"
    )]
    pub realized_quantity: Option<f64>,
    /// Set when the work is carried out by a subcontractor
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_option_id"
    )]
    pub subcontractor_id: Option<String>,
    /// Location label (mahal)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_option_string"
    )]
    pub mahal: Option<String>,
}

impl LineItem {
    /// `unit_price × quantity`, never cached.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.unit_price * self.quantity
    }

    /// `unit_price × realized_quantity`, with an unmeasured quantity counting as zero.
    #[must_use]
    pub fn realized_amount(&self) -> f64 {
        self.unit_price * self.realized_quantity.unwrap_or(0.0)
    }

    /// Category used for grouping.
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() { DEFAULT_CATEGORY } else { trimmed }
    }

    /// Whether the user typed the item in.
    #[must_use]
    pub const fn is_manual(&self) -> bool {
        matches!(self.source, ItemSource::Manual)
    }

    /// Whether a subcontractor carries the work.
    #[must_use]
    pub const fn is_subcontracted(&self) -> bool {
        self.subcontractor_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_is_price_times_quantity() {
        let item: LineItem = serde_json::from_value(json!({
            "id": "a", "code": "15.150.1003", "unitPrice": 12.5, "quantity": 4
        }))
        .unwrap();
        assert_eq!(item.amount(), 50.0);
        assert_eq!(item.realized_amount(), 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let item: LineItem = serde_json::from_value(json!({})).unwrap();
        assert_eq!(item.id, "");
        assert_eq!(item.quantity, 0.0);
        assert_eq!(item.source, ItemSource::Catalog);
        assert_eq!(item.category_or_default(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_lenient_numbers_and_ids() {
        let item: LineItem = serde_json::from_value(json!({
            "id": 1_712_000_000_000_u64,
            "unitPrice": "12,5",
            "quantity": "abc",
            "isManual": true,
            "realizedQuantity": "3"
        }))
        .unwrap();
        assert_eq!(item.id, "1712000000000");
        assert_eq!(item.unit_price, 12.5);
        assert_eq!(item.quantity, 0.0);
        assert!(item.is_manual());
        assert_eq!(item.realized_quantity, Some(3.0));
    }

    #[test]
    fn test_negative_quantity_clamped_on_load() {
        let item: LineItem = serde_json::from_value(json!({ "quantity": -5 })).unwrap();
        assert_eq!(item.quantity, 0.0);
    }

    #[test]
    fn test_source_serializes_as_is_manual_flag() {
        let item: LineItem =
            serde_json::from_value(json!({ "id": "x", "isManual": true })).unwrap();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["isManual"], json!(true));
        assert!(value.get("tag").is_none());
    }

    #[test]
    fn test_unknown_tag_is_dropped() {
        let item: LineItem =
            serde_json::from_value(json!({ "id": "x", "tag": "urgent" })).unwrap();
        assert_eq!(item.tag, None);
        let item: LineItem =
            serde_json::from_value(json!({ "id": "x", "tag": "revised" })).unwrap();
        assert_eq!(item.tag, Some(ItemTag::Revised));
    }
}
