//! Configuration module
//!
//! Storage backend settings are read once at startup. The remote data
//! service is only used when both its URL and access key pass
//! validation; anything else falls back to the local store.

use crate::error::ConfigError;
use log::info;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const REMOTE_URL_VAR: &str = "SUPABASE_URL";
pub const REMOTE_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const DB_PATH_VAR: &str = "OPENCALENDAR_DB_PATH";

pub const URL_PLACEHOLDER: &str = "your_supabase_project_url_here";
pub const KEY_PLACEHOLDER: &str = "your_supabase_anon_key_here";

/// Keys of this length or shorter are rejected.
pub const MIN_KEY_LENGTH: usize = 50;

/// How long an error notification stays visible.
pub const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// Validated settings for the remote data service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub url: Url,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub remote_url: Option<String>,
    pub remote_key: Option<String>,
    pub local_db_path: PathBuf,
}

impl StorageConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        let non_empty = |var: &str| env::var(var).ok().filter(|v| !v.trim().is_empty());

        let local_db_path = non_empty(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        Self {
            remote_url: non_empty(REMOTE_URL_VAR),
            remote_key: non_empty(REMOTE_KEY_VAR),
            local_db_path,
        }
    }

    /// Validate the remote settings, reporting the first rule that fails.
    pub fn remote_settings(&self) -> Result<RemoteSettings, ConfigError> {
        let url = self
            .remote_url
            .as_deref()
            .map(str::trim)
            .ok_or(ConfigError::Missing(REMOTE_URL_VAR))?;
        let key = self
            .remote_key
            .as_deref()
            .map(str::trim)
            .ok_or(ConfigError::Missing(REMOTE_KEY_VAR))?;

        if url == URL_PLACEHOLDER {
            return Err(ConfigError::Placeholder(REMOTE_URL_VAR));
        }
        if key == KEY_PLACEHOLDER {
            return Err(ConfigError::Placeholder(REMOTE_KEY_VAR));
        }
        if !url.starts_with("https://") {
            return Err(ConfigError::InsecureUrl);
        }
        if key.len() <= MIN_KEY_LENGTH {
            return Err(ConfigError::KeyTooShort);
        }

        let url = Url::parse(url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
        if url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl("missing host".to_string()));
        }

        info!("Remote data service configured at {}", url);
        Ok(RemoteSettings {
            url,
            anon_key: key.to_string(),
        })
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("opencalendar")
        .join("calendar.db")
}
