//! Backend endpoint configuration.
//!
//! The backend base URL is resolved in precedence order:
//!
//! 1. `MARKET_LENS_BACKEND_URL` environment variable
//! 2. `backend_url` in `<config dir>/market-lens/config.json`
//! 3. the local development default, `http://localhost:8000`

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides every other source.
pub const BACKEND_URL_ENV: &str = "MARKET_LENS_BACKEND_URL";

/// Fallback when neither the environment nor a config file names a backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

const CONFIG_DIR_NAME: &str = "market-lens";
const CONFIG_FILENAME: &str = "config.json";

/// On-disk configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub backend_url: Option<String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
}

impl Config {
    /// Resolve configuration from the environment, the user config file,
    /// and built-in defaults, in that order.
    pub fn resolve() -> Result<Self> {
        if let Ok(url) = env::var(BACKEND_URL_ENV)
            && !url.trim().is_empty()
        {
            return Ok(Self { backend_url: normalize_url(&url) });
        }
        Self::from_file_or_default(config_file_path().as_deref())
    }

    /// File-then-default resolution against an explicit config path (tests
    /// inject a tempdir here; env precedence is exercised in the CLI tests
    /// where the variable can be scoped to a child process).
    pub fn from_file_or_default(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path
            && path.exists()
        {
            let file = load_config_file(path)?;
            if let Some(url) = file.backend_url
                && !url.trim().is_empty()
            {
                return Ok(Self { backend_url: normalize_url(&url) });
            }
        }

        Ok(Self { backend_url: DEFAULT_BACKEND_URL.to_string() })
    }
}

/// Platform config file location (`~/.config/market-lens/config.json` on
/// Linux). None when the platform exposes no config directory.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Trailing slashes are tolerated in every source and stripped once here so
/// endpoint joining stays uniform.
fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
