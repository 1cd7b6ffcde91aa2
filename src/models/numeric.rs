//! Lenient input handling.
//!
//! Form fields and restored project files carry numbers as JSON numbers,
//! strings (`"1,5"`, `" 90 "`), `null` or nothing at all. Every one of those
//! degrades to a finite `f64`; anything unparseable becomes `0.0`. The same
//! tolerance applies to ids, free text, dates, counters and nested lists, so
//! one odd field never costs the record that holds it.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Parses a user-entered number, accepting a decimal comma.
///
/// Returns `0.0` for empty, non-numeric, NaN or infinite input.
#[must_use]
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    // "1.250,75" -> "1250.75"; a lone comma is a decimal separator
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Converts an arbitrary JSON value into a finite number.
#[must_use]
pub fn number_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_number(s),
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    }
}

/// Clamps a value to the non-negative range used for quantities and prices.
#[must_use]
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// `serde` adapter: any JSON value into a finite `f64`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

/// `serde` adapter: like [`lenient_f64`] but clamped at zero.
pub fn lenient_non_negative<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_f64(deserializer).map(non_negative)
}

/// `serde` adapter: optional number where `null`/missing stays `None`.
pub fn lenient_option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(non_negative(number_from_value(&other))),
    })
}

/// `serde` adapter: identifiers stored as either strings or numbers.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// `serde` adapter: free text where `null` or a number is tolerated.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// `serde` adapter: optional id; numbers become strings, blanks and other
/// shapes become `None`.
pub fn lenient_option_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// `serde` adapter: optional free text; blanks become `None`.
pub fn lenient_option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Parses a calendar date from `2024-03-01`, a datetime with that prefix
/// (`2024-03-01T00:00:00.000Z`) or the Turkish `01.03.2024` form.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d.%m.%Y"))
        .ok()
}

/// `serde` adapter: optional date; anything unparseable becomes `None`.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => parse_date(&s),
        _ => None,
    })
}

/// `serde` adapter: a counter such as a certificate number. Fractions are
/// truncated; negative, out-of-range or unparseable values become `0`.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = number_from_value(&value).trunc();
    // Cast safety: range checked before the cast.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let counter = if (0.0..=f64::from(u32::MAX)).contains(&number) {
        number as u32
    } else {
        0
    };
    Ok(counter)
}

/// `serde` adapter: a nested list whose malformed elements are dropped one by
/// one; a value that is not a list becomes empty.
pub fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    })
}
