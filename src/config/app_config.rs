use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, Smk3Error};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Client configuration read from `<config dir>/config.toml`.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub output: OutputSection,
}

impl AppConfig {
    /// Load `config.toml` from `config_dir`, falling back to defaults when
    /// the file does not exist.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| Smk3Error::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", config_path.display()),
        })?;
        config.server.backend_url = normalize_backend_url(&config.server.backend_url)?;
        Ok(config)
    }

    /// Apply a `--backend-url` / `SMK3_BACKEND_URL` override.
    pub fn with_backend_url(mut self, url: Option<&str>) -> Result<Self> {
        if let Some(url) = url {
            self.server.backend_url = normalize_backend_url(url)?;
        }
        Ok(self)
    }
}

/// The `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
        }
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

/// The `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Where reports, downloads and evidence archives are written.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Require an http(s) scheme and drop any trailing slash.
pub fn normalize_backend_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Smk3Error::InvalidConfig {
            detail: format!("backend URL must start with http:// or https://, got '{trimmed}'"),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
