//! Configuration resolution for grantbridge.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/grantbridge/settings.json)
//! 3. Project config (.grantbridge/settings.json)
//! 4. Environment variables (highest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Complete grantbridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Result store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the sqlite store; platform default when unset.
    pub database_path: Option<PathBuf>,
    /// Default `RUST_LOG` filter for processes embedding the relay.
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: "info".to_string(),
        }
    }
}

/// Watcher polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Delay between store checks (milliseconds).
    pub poll_interval_ms: u64,
    /// How long `wait_for` keeps polling before timing out (seconds).
    pub wait_timeout_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            wait_timeout_secs: 5,
        }
    }
}

impl WatchConfig {
    /// Poll interval as a `Duration`.
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Wait timeout as a `Duration`.
    pub const fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config(project_dir: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    // Load global config
    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            let global = load_config_file(&global_path)?;
            merge_config(&mut config, global);
        }
    }

    // Load project config
    if let Some(dir) = project_dir {
        let project_path = dir.join(".grantbridge").join("settings.json");
        if project_path.exists() {
            let project = load_config_file(&project_path)?;
            merge_config(&mut config, project);
        }
    }

    // Apply environment overrides
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|h| PathBuf::from(h).join(".grantbridge").join("settings.json"))
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME").ok().map(|h| {
            PathBuf::from(h).join("Library/Application Support/grantbridge/settings.json")
        })
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
            .map(|p| p.join("grantbridge").join("settings.json"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

/// Default path for the result store database.
pub fn database_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|h| PathBuf::from(h).join(".grantbridge").join("results.db"))
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join("Library/Application Support/grantbridge/results.db"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
            .map(|p| p.join("grantbridge").join("results.db"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn merge_config(base: &mut Config, overlay: Config) {
    // Merge store config
    if overlay.store.database_path.is_some() {
        base.store.database_path = overlay.store.database_path;
    }
    base.store.log_level = overlay.store.log_level;

    // Merge watch config
    base.watch = overlay.watch;
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(val) = std::env::var("GRANTBRIDGE_DB_PATH") {
        config.store.database_path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("GRANTBRIDGE_LOG_LEVEL") {
        config.store.log_level = val;
    }
    if let Ok(val) = std::env::var("GRANTBRIDGE_POLL_INTERVAL_MS") {
        if let Ok(n) = val.parse() {
            config.watch.poll_interval_ms = n;
        }
    }
    if let Ok(val) = std::env::var("GRANTBRIDGE_WAIT_TIMEOUT_SECS") {
        if let Ok(n) = val.parse() {
            config.watch.wait_timeout_secs = n;
        }
    }
}
