//! Configuration for ambimon
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{AmbientError, Result};

/// Main configuration for an ambient monitor client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Timing Configuration
    // -------------------------------------------------------------------------
    /// Sleep between successive "bytes available" checks while awaiting a reply
    pub poll_interval: Duration,

    /// Maximum wait for a reply. `None` waits indefinitely.
    pub timeout: Option<Duration>,

    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// Address of the serial-over-TCP bridge (host:port)
    pub bridge_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            timeout: Some(Duration::from_millis(500)),
            bridge_addr: "127.0.0.1:4001".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the timing invariant `0 < poll_interval < timeout`
    pub fn validate(&self) -> Result<()> {
        check_poll_interval(self.poll_interval, self.timeout)?;
        check_timeout(self.timeout, self.poll_interval)
    }
}

/// Reject a poll interval that is zero or not below the timeout
pub(crate) fn check_poll_interval(poll_interval: Duration, timeout: Option<Duration>) -> Result<()> {
    if poll_interval.is_zero() {
        return Err(AmbientError::InvalidConfig(
            "poll interval must be > 0".to_string(),
        ));
    }
    match timeout {
        Some(timeout) if poll_interval >= timeout => Err(AmbientError::InvalidConfig(format!(
            "poll interval {:?} must be < timeout {:?}",
            poll_interval, timeout
        ))),
        _ => Ok(()),
    }
}

/// Reject a timeout that is not above the poll interval
pub(crate) fn check_timeout(timeout: Option<Duration>, poll_interval: Duration) -> Result<()> {
    match timeout {
        Some(timeout) if timeout <= poll_interval => Err(AmbientError::InvalidConfig(format!(
            "timeout {:?} must be > poll interval {:?}",
            timeout, poll_interval
        ))),
        _ => Ok(()),
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Set the reply timeout (`None` waits indefinitely)
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the bridge address
    pub fn bridge_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.bridge_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
