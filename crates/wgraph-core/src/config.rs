//! Toolkit configuration (TOML)
//!
//! ```toml
//! [johnson]
//! parallel = true
//! threads = 4
//!
//! [logging]
//! verbose = false
//! level = "debug"
//! json = false
//! ```
//!
//! Every field is optional. `load_from_env` reads the file named by
//! `WGRAPH_CONFIG` and falls back to defaults when the variable is unset.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::graph::JohnsonOptions;

pub const CONFIG_ENV_VAR: &str = "WGRAPH_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ToolkitConfig {
    #[serde(default)]
    pub johnson: JohnsonOptions,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ToolkitConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ToolkitConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the file named by `WGRAPH_CONFIG`, or defaults when unset
    pub fn load_from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(&PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.johnson.threads == Some(0) {
            crate::bail_invalid!("johnson.threads", 0);
        }
        Ok(())
    }
}
