//! Application configuration.
//!
//! Configuration comes from environment variables (a `.env` file is loaded by
//! the binary before this runs). Nothing is persisted between runs.
//!
//! - `PORTALGUN_API_URL`: API base URL
//! - `PORTALGUN_TIMEOUT_SECS`: optional per-request timeout
//! - `PORTALGUN_LOG_DIR`: directory for the log file

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application name used for the log directory path
const APP_NAME: &str = "portalgun";

/// Public Rick and Morty API
pub const DEFAULT_API_BASE_URL: &str = "https://rickandmortyapi.com/api";

const ENV_API_URL: &str = "PORTALGUN_API_URL";
const ENV_TIMEOUT_SECS: &str = "PORTALGUN_TIMEOUT_SECS";
const ENV_LOG_DIR: &str = "PORTALGUN_LOG_DIR";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// `None` means requests may wait indefinitely
    pub request_timeout: Option<Duration>,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config.api_base_url = url.trim().to_string();
        }

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, secs))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        config.log_dir = get(ENV_LOG_DIR).map(PathBuf::from);

        Ok(config)
    }

    /// Directory the log file is written to
    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.log_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
