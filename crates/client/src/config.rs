//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::exclusion::SqliteExclusionStore;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub poll_interval: Duration,
    pub exclusion_db: PathBuf,
}

impl ClientConfig {
    /// `JOBBOARD_API_URL`, `JOBBOARD_POLL_SECS`, `JOBBOARD_EXCLUSION_DB`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("JOBBOARD_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let poll_interval = match lookup("JOBBOARD_POLL_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("JOBBOARD_POLL_SECS must be whole seconds, got {raw:?}"))?;
                anyhow::ensure!(secs > 0, "JOBBOARD_POLL_SECS must be positive");
                Duration::from_secs(secs)
            }
            None => DEFAULT_POLL_INTERVAL,
        };

        let exclusion_db = match lookup("JOBBOARD_EXCLUSION_DB") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => SqliteExclusionStore::default_path()?,
        };

        Ok(Self {
            api_url,
            poll_interval,
            exclusion_db,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let config = ClientConfig::from_lookup(|key| match key {
            "JOBBOARD_API_URL" => Some("http://api.example".into()),
            "JOBBOARD_POLL_SECS" => Some("5".into()),
            "JOBBOARD_EXCLUSION_DB" => Some("/tmp/x.db".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.api_url, "http://api.example");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.exclusion_db, PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let err = ClientConfig::from_lookup(|key| match key {
            "JOBBOARD_POLL_SECS" => Some("0".into()),
            "JOBBOARD_EXCLUSION_DB" => Some("/tmp/x.db".into()),
            _ => None,
        });
        assert!(err.is_err());
    }

    #[test]
    fn defaults_api_url_and_interval() {
        let config = ClientConfig::from_lookup(|key| match key {
            "JOBBOARD_EXCLUSION_DB" => Some("/tmp/x.db".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    }
}
