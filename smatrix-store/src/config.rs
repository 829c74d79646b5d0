//! Engine configuration.
//!
//! Loaded from JSON so front ends can pin the growth policy and the
//! render format without recompiling.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// What `insert` does with a coordinate beyond the current extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPolicy {
    /// Reject with `OutOfBounds`.
    #[default]
    Fixed,
    /// Append empty anchors until the coordinate is addressable.
    Grow,
}

/// Configuration for a [`crate::SparseMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub growth: GrowthPolicy,
    /// Field width of each rendered cell.
    pub render_width: usize,
    /// Decimal places of each rendered cell.
    pub render_precision: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            growth: GrowthPolicy::Fixed,
            render_width: 5,
            render_precision: 1,
        }
    }
}

impl EngineConfig {
    /// Default configuration with on-demand growth.
    pub fn growable() -> Self {
        Self {
            growth: GrowthPolicy::Grow,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: EngineConfig = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_format() {
        let config = EngineConfig::default();
        assert_eq!(config.growth, GrowthPolicy::Fixed);
        assert_eq!(config.render_width, 5);
        assert_eq!(config.render_precision, 1);
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smatrix.json");
        std::fs::write(&path, r#"{ "growth": "grow" }"#).unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config, EngineConfig::growable());
    }

    #[test]
    fn test_load_rejects_unknown_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smatrix.json");
        std::fs::write(&path, r#"{ "growth": "shrink" }"#).unwrap();

        let err = EngineConfig::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config"));
    }
}
