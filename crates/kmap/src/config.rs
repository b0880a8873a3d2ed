//! Configuration management for kmap.
//!
//! Settings live in an optional `kmap.yaml` file. Every key is optional;
//! command-line flags take precedence over file values.
//!
//! ```yaml
//! data-file: maps/ml.jsonl
//! default-depth: 3
//! bottom-up: true
//! ```

use crate::error::{Error, Result};
use crate::extract::{DEFAULT_DEPTH, validate_depth};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "kmap.yaml";

/// Name of the data file used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "kmap.jsonl";

/// Configuration file structure for kmap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct KmapConfig {
    /// Path to the JSONL knowledge map
    pub data_file: PathBuf,

    /// Traversal depth used when `--depth` is not given
    pub default_depth: i64,

    /// Render prerequisites below their dependents
    pub bottom_up: bool,
}

impl Default for KmapConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            default_depth: i64::try_from(DEFAULT_DEPTH).unwrap_or(i64::MAX),
            bottom_up: false,
        }
    }
}

impl KmapConfig {
    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for malformed YAML or unknown keys, and
    /// `Error::InvalidArgument` for a negative default depth.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document, which should mean "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        validate_depth(config.default_depth)?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, otherwise see
    /// [`KmapConfig::from_yaml`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load `path` if given, else `kmap.yaml` in `dir` if present, else defaults.
    ///
    /// An explicitly named file must exist.
    ///
    /// # Errors
    ///
    /// See [`KmapConfig::load`].
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Loading configuration");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Validated default depth
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the depth is negative.
    pub fn depth(&self) -> Result<usize> {
        validate_depth(self.default_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = KmapConfig::default();
        assert_eq!(config.data_file, PathBuf::from("kmap.jsonl"));
        assert_eq!(config.depth().unwrap(), DEFAULT_DEPTH);
        assert_eq!(config.default_depth, 2);
        assert!(!config.bottom_up);
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config = KmapConfig::from_yaml("default-depth: 4\n").unwrap();
        assert_eq!(config.default_depth, 4);
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(KmapConfig::from_yaml("").unwrap(), KmapConfig::default());
    }

    #[test]
    fn test_negative_depth_rejected() {
        let err = KmapConfig::from_yaml("default-depth: -1\n").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = KmapConfig::from_yaml("depth: 3\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_discover_without_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = KmapConfig::discover(None, temp_dir.path()).unwrap();
        assert_eq!(config, KmapConfig::default());
    }

    #[test]
    fn test_discover_reads_file_in_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "bottom-up: true\ndata-file: maps/ml.jsonl\n",
        )
        .unwrap();

        let config = KmapConfig::discover(None, temp_dir.path()).unwrap();
        assert!(config.bottom_up);
        assert_eq!(config.data_file, PathBuf::from("maps/ml.jsonl"));
    }

    #[test]
    fn test_discover_explicit_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.yaml");
        assert!(KmapConfig::discover(Some(&missing), temp_dir.path()).is_err());
    }
}
