//! Project save and restore as a single JSON document.
//!
//! Restoring is best effort. Each top-level field and each list element is
//! decoded on its own, so one malformed entry costs only that entry; the rest
//! of the project still loads. Only input that is not a JSON object at all is
//! rejected.

use crate::{
    errors::{Error, Result},
    models::Project,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

/// Pretty-printed JSON of the whole project.
pub fn to_json(project: &Project) -> Result<String> {
    serde_json::to_string_pretty(project).map_err(Into::into)
}

/// Restores a project from JSON, keeping every field that decodes.
///
/// # Errors
/// Returns `Error::Json` when the text is not JSON and `Error::Validation`
/// when the document is not an object.
pub fn from_json(json: &str) -> Result<Project> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(fields) = value else {
        return Err(Error::Validation {
            field: "project",
            message: "expected a JSON object".to_string(),
        });
    };

    let project = Project {
        meta: restore_field(&fields, "meta"),
        static_items: restore_list(&fields, "staticItems"),
        architectural_items: restore_list(&fields, "architecturalItems"),
        mechanical_items: restore_list(&fields, "mechanicalItems"),
        electrical_items: restore_list(&fields, "electricalItems"),
        doors: restore_list(&fields, "doors"),
        windows: restore_list(&fields, "windows"),
        subcontractors: restore_list(&fields, "subcontractors"),
        progress_payments: restore_list(&fields, "progressPayments"),
        market_research: restore_list(&fields, "marketResearch"),
        tender: restore_field(&fields, "tender"),
        locations: restore_list(&fields, "locations"),
    };

    debug!(
        "Restored project with {} line items",
        project.all_items().count()
    );
    Ok(project)
}

fn restore_field<T: DeserializeOwned + Default>(fields: &Map<String, Value>, key: &str) -> T {
    match fields.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => T::deserialize(value).unwrap_or_else(|e| {
            warn!("Ignoring malformed field '{key}': {e}");
            T::default()
        }),
    }
}

fn restore_list<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Vec<T> {
    match fields.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| match T::deserialize(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Dropping {key}[{index}]: {e}");
                    None
                }
            })
            .collect(),
        Some(_) => {
            warn!("Ignoring '{key}': expected a list");
            Vec::new()
        }
    }
}

/// Writes the project to a file.
pub fn save_to_file<P: AsRef<Path>>(project: &Project, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json(project)?)?;
    info!("Project saved to {}", path.display());
    Ok(())
}

/// Reads a project from a file.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Project> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let project = from_json(&contents)?;
    info!("Project loaded from {}", path.display());
    Ok(project)
}
