//! Configuration file support for the sharemask CLI.
//!
//! Configuration is stored at `~/.config/sharemask/config.toml` (XDG standard),
//! or the platform equivalent. Set `SHAREMASK_CONFIG_DIR` to use another
//! directory, or pass `--config` to point at a file directly.
//!
//! # Example configuration
//!
//! ```toml
//! [shares]
//! directories = [
//!     "/srv/music",
//!     "[Jazz]/srv/other/jazz",
//!     "!/srv/music/private",
//! ]
//! strict = false
//!
//! [search]
//! default_query = "minbr:192"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "SHAREMASK_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub shares: SharesConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

/// Share definitions offered to peers
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SharesConfig {
    /// Raw definitions: `["-"|"!"] ["[" alias "]"] path`
    #[serde(default)]
    pub directories: Vec<String>,

    /// Abort on the first invalid definition instead of skipping it
    #[serde(default)]
    pub strict: bool,
}

/// Search defaults
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Filter query used when `filter` is run without one
    pub default_query: Option<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// and a missing file yields an empty configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = config_path()?;
                if !path.exists() {
                    tracing::debug!(path = %path.display(), "No config file, using defaults");
                    return Ok(Config::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            shares = config.shares.directories.len(),
            "Loaded config"
        );
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Get the path to the configuration file.
pub fn config_path() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir).join(CONFIG_FILE));
    }

    let base_dirs = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

    Ok(base_dirs.config_dir().join("sharemask").join(CONFIG_FILE))
}
