//! Server configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::time::Duration;

use jobboard_trash::{RetentionPolicy, DEFAULT_RETENTION_DAYS, MAX_RETENTION_DAYS};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub retention_days: u32,
    /// Background purge of expired trash; `None` keeps expiry lazy.
    pub sweep_interval: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            retention_days: DEFAULT_RETENTION_DAYS,
            sweep_interval: None,
        }
    }
}

impl ApiConfig {
    /// `BIND_ADDR`, `TRASH_RETENTION_DAYS`, `TRASH_SWEEP_INTERVAL_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup("BIND_ADDR")) {
            config.bind_addr = raw.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    key: "BIND_ADDR",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(raw) = non_empty(lookup("TRASH_RETENTION_DAYS")) {
            let days = parse_positive("TRASH_RETENTION_DAYS", &raw)?;
            if days > u64::from(MAX_RETENTION_DAYS) {
                return Err(ConfigError::Invalid {
                    key: "TRASH_RETENTION_DAYS",
                    value: raw,
                    reason: format!("must be at most {MAX_RETENTION_DAYS}"),
                });
            }
            config.retention_days = days as u32;
        }

        if let Some(raw) = non_empty(lookup("TRASH_SWEEP_INTERVAL_SECS")) {
            let secs = parse_positive("TRASH_SWEEP_INTERVAL_SECS", &raw)?;
            config.sweep_interval = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy::days(self.retention_days)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let n: u64 = raw.parse().map_err(|_| invalid("expected a whole number"))?;
    if n == 0 || n > u64::from(u32::MAX) {
        return Err(invalid("must be between 1 and 4294967295"));
    }
    Ok(n)
}
