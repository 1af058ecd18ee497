//! Settings storage
//!
//! Manages persistence of the sync configuration.

use crate::storage::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

/// Default remote endpoint returning posts-shaped records
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Sync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Remote endpoint to fetch quotes from
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Seconds between periodic sync ticks
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Request timeout in seconds for a single fetch
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_interval_secs() -> u64 {
    30
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SyncSettings {
    /// Validate settings values, replacing unusable ones with defaults
    pub fn validate(&mut self) {
        if self.endpoint.trim().is_empty() {
            self.endpoint = default_endpoint();
        }

        if self.interval_secs == 0 {
            self.interval_secs = default_interval_secs();
        }

        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
        }
        // A timeout longer than the tick interval would let fetches pile up
        if self.timeout_secs > self.interval_secs {
            self.timeout_secs = self.interval_secs;
        }
    }
}

fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings(data_dir: &Path) -> SyncSettings {
    match load_settings_internal(data_dir) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            SyncSettings::default()
        }
    }
}

/// Internal settings loading with error propagation
fn load_settings_internal(data_dir: &Path) -> Result<SyncSettings, StorageError> {
    let path = settings_path(data_dir);

    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(SyncSettings::default());
    }

    let json = fs::read_to_string(&path)?;
    let mut settings: SyncSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(data_dir: &Path, settings: &SyncSettings) -> Result<(), StorageError> {
    let path = settings_path(data_dir);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}
