//! Config path resolution helpers.

use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "stackdeploy.toml";

/// `<config_dir>/stackdeploy/stackdeploy.toml`
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(dir.join("stackdeploy").join(CONFIG_FILE_NAME))
}
