/// Config file loading: catalog seed and derivation overrides
pub mod catalog;

/// Catalog database connection management
pub mod database;

/// Catalog codes for derived door/window quantities
pub mod derivation;

pub use catalog::{CatalogSeed, Config, load_config, load_default_config};
pub use derivation::{DerivationCodes, DerivedItemSpec};
