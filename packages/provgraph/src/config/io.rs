//! Configuration I/O (YAML loading)
//!
//! Schema v1:
//!
//! ```yaml
//! version: 1
//! cell:
//!   width: 35
//!   height: 21
//! layering:
//!   policy: strict
//!   filter_action: hide
//! doi:
//!   auto_update: true
//!   thresholds:
//!     analysis_expand: 0.6
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::settings::{CellConfig, DoiConfig, LayeringConfig, VisConfig};

const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisConfigFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<CellConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layering: Option<LayeringConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<DoiConfig>,
}

impl VisConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: VisConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = VisConfig {
            cell: file.cell.unwrap_or_default(),
            layering: file.layering.unwrap_or_default(),
            doi: file.doi.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML schema v1
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = VisConfigFileV1 {
            version: Some(1),
            cell: Some(self.cell.clone()),
            layering: Some(self.layering.clone()),
            doi: Some(self.doi.clone()),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }
}
