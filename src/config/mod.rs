use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::geometry::ValidationLimits;

/// Store file name used when neither the CLI nor the config names one
pub const DEFAULT_STORE_FILE: &str = "polygons.json";

fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Path of the JSON polygon store
    #[serde(default)]
    pub store: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub limits: ValidationLimits,
}

impl FileConfig {
    /// Read and parse an explicitly named config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Search the usual locations and return the first config that parses
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        // Runs before the log subscriber exists
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Store location from the config, falling back to the data directory
    pub fn store_path(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(default_store_path)
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("polyvault").join(DEFAULT_STORE_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("polyvault.toml"));
    paths.push(PathBuf::from(".polyvault.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("polyvault").join("config.toml"));
        paths.push(config_dir.join("polyvault.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".polyvault.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.store.is_none());
        assert!(!config.verbose);
        assert_eq!(config.limits, ValidationLimits::default());
    }

    #[test]
    fn test_config_overrides_limits() {
        let config: FileConfig = toml::from_str(
            r#"
            store = "/tmp/shapes.json"
            verbose = true

            [limits]
            min_points = 4
            min_coordinate = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.store_path(), PathBuf::from("/tmp/shapes.json"));
        assert!(config.verbose);
        assert_eq!(config.limits.min_points, 4);
        assert_eq!(config.limits.min_coordinate, 0.0);
        assert_eq!(config.limits.max_coordinate, 10000.0);
    }

    #[test]
    fn test_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polyvault.toml");
        std::fs::write(&path, "[limits]\nmax_coordinate = 800.0\n").unwrap();

        let config = FileConfig::from_path(&path).unwrap();
        assert_eq!(config.limits.max_coordinate, 800.0);
    }

    #[test]
    fn test_from_path_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polyvault.toml");
        std::fs::write(&path, "limits = 3").unwrap();

        assert!(FileConfig::from_path(&path).is_err());
    }

    #[test]
    fn test_default_store_path_file_name() {
        let config = FileConfig::default();
        assert!(config.store_path().ends_with(DEFAULT_STORE_FILE));
    }
}
