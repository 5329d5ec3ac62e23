//! Optional RON configuration file. Every key falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jobscan_core::DebounceDelays;
use jobscan_engine::{EngineSettings, FetchSettings, DEFAULT_CONTENT_SELECTOR};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_STORE_FILENAME: &str = ".jobscan_state.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON key/value file holding the keyword list.
    pub store_path: PathBuf,
    pub log_file: Option<PathBuf>,
    pub content_selector: String,
    pub extra_restricted_prefixes: Vec<String>,
    pub auto_check: bool,
    pub debounce: DebounceConfig,
    pub watch_poll_ms: u64,
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILENAME),
            log_file: None,
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            extra_restricted_prefixes: Vec::new(),
            auto_check: true,
            debounce: DebounceConfig::default(),
            watch_poll_ms: 1500,
            fetch: FetchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    pub tab_activated_ms: u64,
    pub tab_loaded_ms: u64,
    pub content_changed_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            tab_activated_ms: 500,
            tab_loaded_ms: 1000,
            content_changed_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            request_timeout_ms: defaults.request_timeout.as_millis() as u64,
            redirect_limit: defaults.redirect_limit,
            max_bytes: defaults.max_bytes,
        }
    }
}

impl AppConfig {
    /// Reads `path` when given; no path means all defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn debounce_delays(&self) -> DebounceDelays {
        DebounceDelays {
            tab_activated: Duration::from_millis(self.debounce.tab_activated_ms),
            tab_loaded: Duration::from_millis(self.debounce.tab_loaded_ms),
            content_changed: Duration::from_millis(self.debounce.content_changed_ms),
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            content_selector: self.content_selector.clone(),
            extra_restricted_prefixes: self.extra_restricted_prefixes.clone(),
            poll_interval: Duration::from_millis(self.watch_poll_ms.max(1)),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_millis(self.fetch.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.fetch.request_timeout_ms),
            redirect_limit: self.fetch.redirect_limit,
            max_bytes: self.fetch.max_bytes,
            ..FetchSettings::default()
        }
    }
}
