//! Connection configuration.
//!
//! Loaded once at startup and passed into the client constructor; the
//! matching core never reads ambient environment state.

use std::time::Duration;

use crate::error::{MoodleError, Result};

pub const ENV_URL: &str = "MOODLE_URL";
pub const ENV_TOKEN: &str = "MOODLE_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "MOODLE_TIMEOUT_SECS";
pub const ENV_CALL_DELAY_MS: &str = "MOODLE_CALL_DELAY_MS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CALL_DELAY: Duration = Duration::from_millis(500);

/// Everything needed to talk to the Moodle REST endpoint.
#[derive(Debug, Clone)]
pub struct MoodleConfig {
    /// Web service endpoint, e.g. `https://lms.example.edu/webservice/rest/server.php`.
    pub endpoint: String,
    /// Web service token.
    pub token: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Fixed delay between consecutive calls, to respect rate limits.
    pub call_delay: Duration,
}

impl MoodleConfig {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            call_delay: DEFAULT_CALL_DELAY,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = delay;
        self
    }

    /// Build from process environment (`MOODLE_URL`, `MOODLE_TOKEN`,
    /// optional timeout/delay overrides). Missing required values are a
    /// fatal configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary lookup. Lets tests supply values without
    /// touching process-global environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint = required(&lookup, ENV_URL)?;
        let token = required(&lookup, ENV_TOKEN)?;
        let mut config = Self::new(endpoint, token);
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = parse_u64(ENV_TIMEOUT_SECS, &raw)?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(ENV_CALL_DELAY_MS) {
            let millis = parse_u64(ENV_CALL_DELAY_MS, &raw)?;
            config.call_delay = Duration::from_millis(millis);
        }
        Ok(config)
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<String> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(MoodleError::MissingConfig(name)),
    }
}

fn parse_u64(name: &'static str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| MoodleError::InvalidConfig {
            name,
            value: raw.to_string(),
        })
}
