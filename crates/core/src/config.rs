//! Application configuration.
//!
//! Values are layered: built-in defaults, then `config.toml` under the user's
//! config directory, then `GAMEHUB_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Directory under `~/.config` holding the hub configuration.
pub const CONFIG_DIR: &str = "gamehub";
/// File name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# Game hub configuration.

# Path or http(s) URL of the catalog JSON.
catalog_source = "data/games.json"

# Base used to resolve relative play URLs such as /games/a.html.
site_root = "http://localhost:5173"

hub_title = "GameAnt's PlayGround"
tagline = "Infinite Fun, One Place. Play instant games or clear missions on your phone."

# Command used to open outbound links. Defaults to the platform opener.
# open_command = "firefox"

request_timeout_secs = 10
"#;

/// Runtime configuration for the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Location of the catalog: a filesystem path or an `http(s)` URL.
    pub catalog_source: String,
    /// Base for relative play URLs.
    pub site_root: String,
    /// Header title on the listing.
    pub hub_title: String,
    /// Header tagline on the listing.
    pub tagline: String,
    /// Override for the outbound link opener.
    pub open_command: Option<String>,
    /// HTTP timeout for remote catalogs.
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_source: "data/games.json".to_string(),
            site_root: "http://localhost:5173".to_string(),
            hub_title: "GameAnt's PlayGround".to_string(),
            tagline: "Infinite Fun, One Place. Play instant games or clear missions on your phone."
                .to_string(),
            open_command: None,
            request_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location plus the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path` (optional) plus the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("GAMEHUB").try_parsing(true))
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        settings
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// Timeout applied to remote catalog requests.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Resolve a play URL against `site_root`.
    ///
    /// Absolute URLs are returned untouched.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.contains("://") {
            return url.to_string();
        }
        let root = self.site_root.trim_end_matches('/');
        if url.starts_with('/') {
            format!("{root}{url}")
        } else {
            format!("{root}/{url}")
        }
    }
}

/// Default configuration file path.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the commented default configuration if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_default_config_at(config_path())
}

/// Write the commented default configuration to `path` if it is missing.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))
}
