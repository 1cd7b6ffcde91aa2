//! Application configuration loaded from `metraj.toml`.
//!
//! The file seeds the unit-price catalog (`[[catalog]]` entries) and may
//! override the derivation code table (`[derivation]`). A missing file is not
//! an error: the catalog starts empty and the built-in codes apply.

use super::derivation::DerivationCodes;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "metraj.toml";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "METRAJ_CONFIG";

/// Configuration structure representing the entire config file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Catalog entries to load into the search database
    #[serde(default)]
    pub catalog: Vec<CatalogSeed>,
    /// Catalog codes for derived door/window quantities
    #[serde(default)]
    pub derivation: DerivationCodes,
}

/// One unit-price entry to seed
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogSeed {
    /// Unit-price code, e.g. "15.150.1003"
    pub code: String,
    /// Description as printed in the price book
    pub description: String,
    /// Unit symbol; must parse as a known unit
    pub unit: String,
    /// Unit price in lira
    pub unit_price: f64,
    /// Chapter used for grouping; may be empty
    #[serde(default)]
    pub category: String,
}

/// Loads the configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the configuration from `$METRAJ_CONFIG` or `./metraj.toml`,
/// falling back to defaults when the file does not exist.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        info!("No config file at {path}; using built-in defaults");
        return Ok(Config::default());
    }
    load_config(&path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_catalog_config() {
        let toml_str = r#"
            [[catalog]]
            code = "15.150.1003"
            description = "Beton santralinde üretilen C25/30 hazır beton"
            unit = "m³"
            unit_price = 2450.0
            category = "Betonarme"

            [[catalog]]
            code = "15.250.1010"
            description = "Seramik yer kaplaması"
            unit = "m²"
            unit_price = 610.5
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.len(), 2);
        assert_eq!(config.catalog[0].code, "15.150.1003");
        assert_eq!(config.catalog[0].unit_price, 2450.0);
        assert_eq!(config.catalog[1].category, "");
        assert_eq!(config.derivation, DerivationCodes::default());
    }

    #[test]
    fn test_load_config_missing_file_is_config_error() {
        let result = load_config("/definitely/not/here/metraj.toml");
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
