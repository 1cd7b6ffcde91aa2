//! Money-side records: subcontractors and their payments, progress payments
//! (hakediş) and market price research quotes.

use super::numeric::{
    lenient_date, lenient_f64, lenient_id, lenient_non_negative, lenient_string, lenient_u32,
    lenient_vec,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A cash payment made to a subcontractor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique id
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    /// Payment date, if known
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    /// Free-text note
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Amount paid in lira
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
}

/// A subcontractor firm; its work is the set of line items carrying its id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcontractor {
    /// Unique id; line items refer to it
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    /// Firm name
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Trade or scope, e.g. "Sıva", "Elektrik tesisatı"
    #[serde(default, deserialize_with = "lenient_string")]
    pub trade: String,
    /// Payments made so far
    #[serde(default, deserialize_with = "lenient_vec")]
    pub payments: Vec<Payment>,
}

/// One certified progress payment. Amounts are cumulative to date, the way
/// hakediş documents are issued.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPayment {
    /// Unique id
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    /// Certificate number (hakediş no)
    #[serde(default, deserialize_with = "lenient_u32")]
    pub number: u32,
    /// Certificate date
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    /// Free-text note
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Value of work done to date
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub cumulative_amount: f64,
}

/// A supplier's offer for one researched item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Supplier name
    #[serde(default, deserialize_with = "lenient_string")]
    pub supplier: String,
    /// Offered unit price in lira
    #[serde(default, deserialize_with = "lenient_f64")]
    pub unit_price: f64,
}

/// An item priced by market research instead of the official catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketResearchItem {
    /// Unique id
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    /// Item code (poz no)
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: String,
    /// Item description
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Unit symbol
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: String,
    /// Quantity to be priced
    #[serde(default, deserialize_with = "lenient_non_negative")]
    pub quantity: f64,
    /// Collected supplier quotes
    #[serde(default, deserialize_with = "lenient_vec")]
    pub quotes: Vec<PriceQuote>,
}
