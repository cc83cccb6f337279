//! Tracker configuration
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! (or empty) file is valid. Environment variables are applied on top.

use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::DEFAULT_API_URL;
use crate::error::{Result, TrackerError};

/// Overrides `api_url`
pub const ENV_API_URL: &str = "FPOINT_API_URL";
/// Overrides `refetch_interval_secs`
pub const ENV_REFETCH_SECS: &str = "FPOINT_REFETCH_SECS";

/// Upper bound for every interval setting (one year)
pub const MAX_INTERVAL_SECS: u64 = 365 * 86_400;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of the points API, without trailing slash
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Seconds between re-projections of the held snapshot
    #[serde(default = "default_display_refresh_secs")]
    pub display_refresh_secs: u64,

    /// Seconds between fetches of a fresh snapshot
    #[serde(default = "default_refetch_interval_secs")]
    pub refetch_interval_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// DeFi pools to break out in every report
    #[serde(default)]
    pub pool_addresses: Vec<String>,
}

fn default_api_url() -> String { DEFAULT_API_URL.to_string() }
fn default_display_refresh_secs() -> u64 { 1 }
fn default_refetch_interval_secs() -> u64 { 60 }
fn default_request_timeout_secs() -> u64 { 10 }

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            display_refresh_secs: 1,
            refetch_interval_secs: 60,
            request_timeout_secs: 10,
            pool_addresses: Vec::new(),
        }
    }
}

impl TrackerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        if let Some(url) = read(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(secs) = read(ENV_REFETCH_SECS).and_then(|s| s.parse().ok()) {
            self.refetch_interval_secs = secs;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(TrackerError::InvalidConfig("api_url is empty".into()));
        }
        let intervals = [
            ("display_refresh_secs", self.display_refresh_secs),
            ("refetch_interval_secs", self.refetch_interval_secs),
            ("request_timeout_secs", self.request_timeout_secs),
        ];
        for (name, secs) in intervals {
            if secs == 0 {
                return Err(TrackerError::InvalidConfig(format!("{name} must be > 0")));
            }
            if secs > MAX_INTERVAL_SECS {
                return Err(TrackerError::InvalidConfig(format!(
                    "{name} must be at most {MAX_INTERVAL_SECS}, got {secs}"
                )));
            }
        }
        Ok(())
    }

    pub fn display_refresh(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.display_refresh_secs)
    }

    /// Saturates at `chrono::Duration::MAX` for values `validate` would reject
    pub fn refetch_interval(&self) -> chrono::Duration {
        i64::try_from(self.refetch_interval_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}
