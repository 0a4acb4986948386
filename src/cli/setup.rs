use crate::core::config::AppConfig;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_HEADER: &str = "\
# fxconv configuration
#
# server.bind_address: address `fxconv serve` listens on
# dataset_path: optional CSV with columns id,Description,Rate,EffectiveDate,CurrencyCode;
#   the dataset bundled with the binary is used when it is not set
";

/// Default configuration as YAML, prefixed with a short description of each key.
pub fn render_default_config() -> Result<String> {
    let body = serde_yaml::to_string(&AppConfig::default())
        .context("Failed to render default config")?;
    Ok(format!("{CONFIG_HEADER}{body}"))
}

/// Writes the default configuration to `path`, or to the platform config dir when `None`.
///
/// Refuses to overwrite an existing file.
pub fn setup(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => AppConfig::default_config_path()?,
    };

    if path.exists() {
        bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(&path, render_default_config()?)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    info!(path = %path.display(), "Created default configuration");
    Ok(path)
}
