//! ScannerConfig - スキャナの設定
//!
//! 既定値は元のサービスの定数そのまま（key と 10 分間隔）。

use std::env;
use std::time::Duration;

pub const DEFAULT_CHECKPOINT_KEY: &str = "PolicyExpirationChecker.LastRunUtc";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10 * 60);

pub const ENV_CHECKPOINT_KEY: &str = "LAPSE_CHECKPOINT_KEY";
pub const ENV_SCAN_INTERVAL_SECS: &str = "LAPSE_SCAN_INTERVAL_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidInterval { var: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Identifies this scanner's row in the checkpoint store.
    pub checkpoint_key: String,
    /// Sleep between iterations.
    pub interval: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            checkpoint_key: DEFAULT_CHECKPOINT_KEY.to_string(),
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl ScannerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// 環境変数の読み方を差し替えられる版（テスト用に env を汚さない）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup(ENV_CHECKPOINT_KEY) {
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::Empty(ENV_CHECKPOINT_KEY));
            }
            config.checkpoint_key = key.to_string();
        }

        if let Some(raw) = lookup(ENV_SCAN_INTERVAL_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidInterval {
                    var: ENV_SCAN_INTERVAL_SECS,
                    value: raw.clone(),
                })?;
            config.interval = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_match_original_service() {
        let config = ScannerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.checkpoint_key, "PolicyExpirationChecker.LastRunUtc");
        assert_eq!(config.interval, Duration::from_secs(600));
    }

    #[test]
    fn overrides_are_applied() {
        let config = ScannerConfig::from_lookup(lookup(&[
            (ENV_CHECKPOINT_KEY, "nightly"),
            (ENV_SCAN_INTERVAL_SECS, " 30 "),
        ]))
        .unwrap();
        assert_eq!(config.checkpoint_key, "nightly");
        assert_eq!(config.interval, Duration::from_secs(30));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = ScannerConfig::from_lookup(lookup(&[(ENV_SCAN_INTERVAL_SECS, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInterval { .. }));
    }

    #[test]
    fn garbage_interval_is_rejected() {
        let err =
            ScannerConfig::from_lookup(lookup(&[(ENV_SCAN_INTERVAL_SECS, "ten")])).unwrap_err();
        assert!(err.to_string().contains("ten"));
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = ScannerConfig::from_lookup(lookup(&[(ENV_CHECKPOINT_KEY, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Empty(_)));
    }
}
