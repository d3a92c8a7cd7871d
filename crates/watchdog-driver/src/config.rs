//! Driver configuration.
//!
//! Loaded from YAML. Every key is optional and falls back to the values the
//! firmware was designed around:
//!
//! ```yaml
//! baud_rate: 9600
//! settle_delay_ms: 1000
//! read_buffer_len: 32
//! io_timeout_ms: 1000
//! channel_policy: reject
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WatchdogError};

/// Serial line speed of the watchdog firmware.
pub const DEFAULT_BAUD_RATE: u32 = 9600;
/// Wait between writing a command and reading the reply.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;
/// Size of the single reply read.
pub const DEFAULT_READ_BUFFER_LEN: usize = 32;
/// Serial read/write timeout.
pub const DEFAULT_IO_TIMEOUT_MS: u64 = 1000;

/// What to do when a touch or turn command names a non-relay channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelPolicy {
    /// Fail with a protocol error before anything is sent.
    #[default]
    Reject,
    /// Send nothing and report success.
    Ignore,
}

/// Connection and protocol settings for one watchdog handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub baud_rate: u32,
    pub settle_delay_ms: u64,
    pub read_buffer_len: usize,
    pub io_timeout_ms: u64,
    pub channel_policy: ChannelPolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            baud_rate: DEFAULT_BAUD_RATE,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            read_buffer_len: DEFAULT_READ_BUFFER_LEN,
            io_timeout_ms: DEFAULT_IO_TIMEOUT_MS,
            channel_policy: ChannelPolicy::default(),
        }
    }
}

impl DriverConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::parse(text, Path::new(""))
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| WatchdogError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        // An empty document means "all defaults".
        if text.trim().is_empty() {
            return Ok(DriverConfig::default());
        }
        let config: DriverConfig = serde_yaml::from_str(text).map_err(|e| WatchdogError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate().map_err(|reason| WatchdogError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.baud_rate == 0 {
            return Err("baud_rate must be positive".to_string());
        }
        if self.read_buffer_len < watchdog_protocol::MNEMONIC_LEN {
            return Err(format!(
                "read_buffer_len must be at least {}",
                watchdog_protocol::MNEMONIC_LEN
            ));
        }
        Ok(())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}
