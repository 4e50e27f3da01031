//! Configuration module for osc-replay
//!
//! Settings are resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults ([`ReplayConfig::default`])
//! 2. A TOML file: the `--config` path if given, otherwise
//!    `<config dir>/osc-replay/config.toml` when it exists
//! 3. Command-line flags
//!
//! # Config Location
//!
//! - **Linux**: `~/.config/osc-replay/config.toml`
//! - **macOS**: `~/Library/Application Support/osc-replay/config.toml`
//! - **Windows**: `%APPDATA%\osc-replay\config.toml`
//!
//! # Example
//!
//! ```toml
//! log_file = "captures/session1.txt"
//! send_address = "192.168.1.40"
//! send_port = 9000
//! fps = 30.0
//! log_dir = "/var/log/osc-replay"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ReplayError, Result};
use crate::replay::frame_period;

/// Application identifier for config directories
pub const APP_ID: &str = "osc-replay";

/// Config filename inside the app config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Default replay rate in frames per second
pub const DEFAULT_FPS: f64 = 14.0;

/// Default log file to replay
pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// Default destination host
pub const DEFAULT_SEND_ADDRESS: &str = "127.0.0.1";

/// Default destination port
pub const DEFAULT_SEND_PORT: u16 = 9000;

/// Path to the default config file, if a config directory exists on this platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

/// Replay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Log file to read records from
    pub log_file: PathBuf,

    /// Destination host name or IP
    pub send_address: String,

    /// Destination UDP port
    pub send_port: u16,

    /// Frames per second
    pub fps: f64,

    /// Directory for rolling log files (stderr only when unset)
    pub log_dir: Option<PathBuf>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            send_address: DEFAULT_SEND_ADDRESS.to_string(),
            send_port: DEFAULT_SEND_PORT,
            fps: DEFAULT_FPS,
            log_dir: None,
        }
    }
}

impl ReplayConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ReplayError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReplayError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_toml_str(&content).map_err(|e| e.with_context(format!("{:?}", path)))
    }

    /// Load `explicit` if given, else the default config file if present, else defaults
    ///
    /// An explicit path that cannot be read is an error. A missing default
    /// file is not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::info!("Using config: {}", path.display());
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Using config: {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ReplayError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check values that the replayer relies on
    pub fn validate(&self) -> Result<()> {
        frame_period(self.fps)?;
        if self.send_address.trim().is_empty() {
            return Err(ReplayError::Config("send_address must not be empty".to_string()));
        }
        Ok(())
    }

    /// Destination as `host:port` for display
    pub fn destination(&self) -> String {
        format!("{}:{}", self.send_address, self.send_port)
    }
}
