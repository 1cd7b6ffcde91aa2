//! Unified error type for the takeoff core.
//!
//! Calculation paths never fail (bad numbers degrade to zero), so most variants
//! come from the two hard surfaces: manual line item validation and the catalog
//! database.

use thiserror::Error;

/// Everything that can go wrong in the takeoff core.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unreadable configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A user-entered field was rejected
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A money amount was negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    /// No line item has the given id
    #[error("Line item not found: {id}")]
    LineItemNotFound { id: String },

    /// Catalog items cannot be deleted
    #[error("Line item {id} comes from the catalog and cannot be deleted")]
    NotDeletable { id: String },

    /// Catalog items only accept quantity edits
    #[error("Line item {id} comes from the catalog; only its quantity can change")]
    NotEditable { id: String },

    /// No catalog entry has the given code
    #[error("Catalog entry not found: {code}")]
    CatalogEntryNotFound { code: String },

    /// Catalog reads before the background load finished
    #[error("Catalog is still loading")]
    CatalogNotReady,

    /// Catalog database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Reading or writing project files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Project JSON could not be read or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
