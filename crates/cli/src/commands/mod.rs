//! CLI command implementations.
//!
//! Shared helpers for reading configuration files and the resource state file.
//! The state file is the JSON form of [`ResourceData`]: `{"id", "attributes"}`.

pub mod apply;
pub mod delete;
pub mod import;
pub mod plan;
pub mod read;
pub mod schema;
pub mod validate;

use anyhow::{Context, Result, bail};
use cloudlogs_provider::{DashboardResource, FlatMap, ResourceData};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::formatters::write_to_file;

/// The dashboard resource with its schema table.
pub fn dashboard_resource() -> Result<DashboardResource> {
    DashboardResource::new().context("Failed to build the dashboard schema")
}

/// Read a flat configuration from a JSON or YAML file.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else as JSON.
pub fn load_configuration(path: &Path) -> Result<FlatMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let value: Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in {}", path.display()))?
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => bail!(
            "Configuration file {} must contain a mapping of attributes",
            path.display()
        ),
    }
}

/// Read the state file; a missing file means nothing is tracked yet.
pub fn load_state(path: &Path) -> Result<Option<ResourceData>> {
    if !path.exists() {
        debug!(path = %path.display(), "No state file");
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    let data: ResourceData = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse state file {}", path.display()))?;
    Ok(Some(data))
}

/// Read the state file and require a tracked dashboard.
pub fn load_existing_state(path: &Path) -> Result<ResourceData> {
    match load_state(path)? {
        Some(data) if data.exists() => Ok(data),
        _ => bail!(
            "No dashboard is tracked in {}; run `apply` or `import` first",
            path.display()
        ),
    }
}

/// Write the state file, or remove it once the dashboard is gone.
pub fn save_state(path: &Path, data: &ResourceData) -> Result<()> {
    if !data.exists() {
        if path.exists() {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove state file {}", path.display()))?;
        }
        return Ok(());
    }
    let mut content = serde_json::to_string_pretty(data).context("Failed to encode state")?;
    content.push('\n');
    write_to_file(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_configuration_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("dashboard.json");
        std::fs::write(&json_path, r#"{"name": "Checkout", "layout": [{}]}"#).unwrap();
        let flat = load_configuration(&json_path).unwrap();
        assert_eq!(flat["name"], json!("Checkout"));

        let yaml_path = dir.path().join("dashboard.YML");
        std::fs::write(&yaml_path, "name: Checkout\nlayout:\n  - {}\n").unwrap();
        let flat = load_configuration(&yaml_path).unwrap();
        assert_eq!(flat["layout"], json!([{}]));
    }

    #[test]
    fn test_load_configuration_rejects_non_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = load_configuration(&path).unwrap_err();
        assert!(err.to_string().contains("must contain a mapping"));
    }

    #[test]
    fn test_state_round_trip_and_removal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.state.json");
        assert!(load_state(&path).unwrap().is_none());
        assert!(load_existing_state(&path).is_err());

        let mut data = ResourceData::from_config(FlatMap::new());
        data.set_id("us-south/inst/dash");
        data.set("name", json!("Checkout"));
        save_state(&path, &data).unwrap();
        assert_eq!(load_existing_state(&path).unwrap(), data);

        data.clear();
        save_state(&path, &data).unwrap();
        assert!(!path.exists());
    }
}
