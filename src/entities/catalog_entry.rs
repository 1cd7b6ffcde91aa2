//! Catalog entry entity - one unit-price item (poz) of the reference catalog.
//!
//! Entries are keyed by their dotted numeric code (e.g. "15.150.1003").
//! `description_folded` holds the lowercase description so lookups are
//! case-insensitive beyond ASCII (İ/ı, Ş/ş, ...).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_entries")]
pub struct Model {
    /// Row identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unit-price code, unique across the catalog
    #[sea_orm(unique)]
    pub code: String,
    /// Work description as published
    pub description: String,
    /// Lowercase copy of `description` used for searching
    #[serde(skip)]
    pub description_folded: String,
    /// Unit of measure (see [`crate::models::Unit`])
    pub unit: String,
    /// Unit price in Turkish lira
    pub unit_price: f64,
    /// Trade/category the entry is listed under
    pub category: String,
}

/// Catalog entries stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
