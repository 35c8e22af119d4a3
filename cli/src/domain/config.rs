//! Connection settings and polling policy.
//!
//! Pure functions only. No I/O, no async, no filesystem access.

use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_TENANT: &str = "vsphere.local";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

// ── Connection settings ──────────────────────────────────────────────────────

/// vRA endpoint and credentials, read from `VRA7_*` environment variables.
#[derive(Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the appliance, e.g. `https://vra.example.com/`.
    pub host: String,
    #[serde(default = "default_tenant")]
    pub tenant: String,
    pub username: String,
    pub password: String,
    /// Seconds between request status checks.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("tenant", &self.tenant)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("poll_interval_secs", &self.poll_interval_secs)
            .finish()
    }
}

fn default_tenant() -> String {
    DEFAULT_TENANT.to_string()
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

// ── Poll policy ──────────────────────────────────────────────────────────────

/// How long and how often to poll a submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    /// Build a policy from an interval in seconds and a timeout in minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero.
    pub fn new(interval_secs: u64, timeout_minutes: u64) -> Result<Self> {
        if interval_secs == 0 {
            return Err(ConfigError::InvalidPollInterval.into());
        }
        Ok(Self {
            interval: Duration::from_secs(interval_secs),
            timeout: Duration::from_secs(timeout_minutes.saturating_mul(60)),
        })
    }

    /// Number of status checks that fit in the timeout: `ceil(timeout / interval)`.
    #[must_use]
    pub fn attempts(&self) -> u64 {
        let interval = self.interval.as_millis().max(1);
        let attempts = self.timeout.as_millis().div_ceil(interval);
        u64::try_from(attempts).unwrap_or(u64::MAX)
    }
}
