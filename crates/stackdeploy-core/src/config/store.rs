//! Config store for loading and saving stackdeploy.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{StackDeployConfig, parser, paths::default_config_path};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at the platform default location.
    pub fn from_default() -> anyhow::Result<Self> {
        Ok(Self::from_path(default_config_path()?))
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config; a missing file yields an empty config.
    pub fn load(&self) -> anyhow::Result<StackDeployConfig> {
        if !self.config_path.exists() {
            return Ok(StackDeployConfig::new());
        }
        parser::parse_config(&self.config_path)
    }

    pub fn save(&self, config: &StackDeployConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}
