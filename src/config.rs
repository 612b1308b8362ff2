use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Seconds a seat gets to claim or decline the landlord role.
pub const DEFAULT_BID_TIMEOUT_SECS: u64 = 8;
/// Seconds a seat gets to play or pass.
pub const DEFAULT_PLAY_TIMEOUT_SECS: u64 = 15;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be at least 1 second")]
    ZeroTimeout { var: &'static str },
}

/// Per-match settings. Timers are fixed per class: one for bidding, one for play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    #[serde(with = "secs")]
    pub bid_timeout: Duration,
    #[serde(with = "secs")]
    pub play_timeout: Duration,
    /// Fixed shuffle seed. `None` draws a fresh seed per controller.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            bid_timeout: Duration::from_secs(DEFAULT_BID_TIMEOUT_SECS),
            play_timeout: Duration::from_secs(DEFAULT_PLAY_TIMEOUT_SECS),
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build from `DDZ_BID_TIMEOUT_SECS`, `DDZ_PLAY_TIMEOUT_SECS` and `DDZ_SEED`,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(secs) = timeout_var("DDZ_BID_TIMEOUT_SECS")? {
            cfg.bid_timeout = secs;
        }
        if let Some(secs) = timeout_var("DDZ_PLAY_TIMEOUT_SECS")? {
            cfg.play_timeout = secs;
        }
        cfg.seed = u64_var("DDZ_SEED")?;
        Ok(cfg)
    }
}

fn u64_var(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber { var, value }),
        Err(_) => Ok(None),
    }
}

fn timeout_var(var: &'static str) -> Result<Option<Duration>, ConfigError> {
    match u64_var(var)? {
        Some(0) => Err(ConfigError::ZeroTimeout { var }),
        Some(secs) => Ok(Some(Duration::from_secs(secs))),
        None => Ok(None),
    }
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_table_timers() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.bid_timeout, Duration::from_secs(8));
        assert_eq!(cfg.play_timeout, Duration::from_secs(15));
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn deserializes_partial_json_over_defaults() {
        let cfg: MatchConfig = serde_json::from_str(r#"{"playTimeout": 30, "seed": 7}"#).unwrap();
        assert_eq!(cfg.bid_timeout, Duration::from_secs(8));
        assert_eq!(cfg.play_timeout, Duration::from_secs(30));
        assert_eq!(cfg.seed, Some(7));
    }
}
