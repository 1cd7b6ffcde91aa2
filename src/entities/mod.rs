//! Entity module - SeaORM entity definitions for the catalog database.

/// Unit-price catalog rows
pub mod catalog_entry;

pub use catalog_entry::{
    Column as CatalogEntryColumn, Entity as CatalogEntry, Model as CatalogEntryModel,
};
