//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the backend address, the session storage backend and the
//! last email used to log in.
//!
//! Configuration is stored at `~/.config/helpdesk/config.json`. The
//! `HELPDESK_API_URL` and `HELPDESK_SESSION_BACKEND` environment variables
//! take precedence over the file.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::client::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::session::{FileSessionStore, KeyringSessionStore, MemorySessionStore, SessionStore};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "helpdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend address used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

pub const API_URL_ENV: &str = "HELPDESK_API_URL";
pub const SESSION_BACKEND_ENV: &str = "HELPDESK_SESSION_BACKEND";

/// Keychain account the session is stored under
const KEYRING_ACCOUNT: &str = "session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    File,
    Keyring,
    Memory,
}

impl FromStr for SessionBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(SessionBackend::File),
            "keyring" | "keychain" => Ok(SessionBackend::Keyring),
            "memory" => Ok(SessionBackend::Memory),
            _ => Err(format!("unknown session backend: {}", s)),
        }
    }
}

impl std::fmt::Display for SessionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionBackend::File => write!(f, "file"),
            SessionBackend::Keyring => write!(f, "keyring"),
            SessionBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_email: Option<String>,
    #[serde(default)]
    pub session_backend: SessionBackend,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents).context("Failed to parse config file")?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the session file
    pub fn session_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Backend address: environment, then config file, then the default
    pub fn api_base_url(&self) -> String {
        self.resolve_api_base_url(std::env::var(API_URL_ENV).ok().as_deref())
    }

    fn resolve_api_base_url(&self, env_value: Option<&str>) -> String {
        env_value
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .or(self.api_base_url.as_deref().filter(|url| !url.is_empty()))
            .unwrap_or(DEFAULT_API_BASE_URL)
            .to_string()
    }

    pub fn session_backend(&self) -> SessionBackend {
        self.resolve_session_backend(std::env::var(SESSION_BACKEND_ENV).ok().as_deref())
    }

    fn resolve_session_backend(&self, env_value: Option<&str>) -> SessionBackend {
        match env_value.filter(|v| !v.trim().is_empty()) {
            Some(value) => match value.parse() {
                Ok(backend) => backend,
                Err(e) => {
                    warn!(error = %e, "Ignoring {}", SESSION_BACKEND_ENV);
                    self.session_backend
                }
            },
            None => self.session_backend,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Open the configured session store
    pub fn open_session_store(&self) -> Result<Arc<dyn SessionStore>> {
        let store: Arc<dyn SessionStore> = match self.session_backend() {
            SessionBackend::File => Arc::new(FileSessionStore::open(self.session_dir()?)?),
            SessionBackend::Keyring => Arc::new(KeyringSessionStore::open(KEYRING_ACCOUNT)?),
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        };
        Ok(store)
    }
}
