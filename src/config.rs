use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use dotenvy::dotenv;

use crate::db::StorageLayout;
use crate::ledger::LedgerConfig;
use crate::utils::time_policy::DEFAULT_LATE_THRESHOLD;

const LATE_THRESHOLD_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone)]
pub struct Config {
    pub users_csv: PathBuf,
    pub attendance_dir: PathBuf,
    pub late_threshold: NaiveTime,

    // Logging
    pub log_dir: PathBuf,
    pub log_file: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let late_threshold = match lookup("LATE_THRESHOLD") {
            Some(raw) => NaiveTime::parse_from_str(raw.trim(), LATE_THRESHOLD_FORMAT)
                .with_context(|| format!("LATE_THRESHOLD must be HH:MM:SS, got `{}`", raw))?,
            None => *DEFAULT_LATE_THRESHOLD,
        };

        let log_level = var("LOG_LEVEL", "info");
        let log_level = tracing::Level::from_str(log_level.trim())
            .with_context(|| format!("LOG_LEVEL is not a tracing level: `{}`", log_level))?;

        Ok(Self {
            users_csv: var("USERS_CSV", "data/users.csv").into(),
            attendance_dir: var("ATTENDANCE_DIR", "data/attendance_logs").into(),
            late_threshold,
            log_dir: var("LOG_DIR", "logs").into(),
            log_file: var("LOG_FILE", "ledger.log"),
            log_level,
        })
    }

    pub fn ledger(&self) -> LedgerConfig {
        LedgerConfig {
            layout: StorageLayout::new(&self.users_csv, &self.attendance_dir),
            late_threshold: self.late_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.users_csv, PathBuf::from("data/users.csv"));
        assert_eq!(config.attendance_dir, PathBuf::from("data/attendance_logs"));
        assert_eq!(config.late_threshold, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
        assert_eq!(config.log_level, tracing::Level::INFO);
    }

    #[test]
    fn overrides_are_applied() {
        let config = from_pairs(&[
            ("LATE_THRESHOLD", "09:15:00"),
            ("ATTENDANCE_DIR", "/var/lib/ledger/days"),
            ("LOG_LEVEL", "debug"),
        ])
        .unwrap();
        assert_eq!(config.late_threshold, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
        assert_eq!(config.ledger().layout.attendance_dir, PathBuf::from("/var/lib/ledger/days"));
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn malformed_values_name_the_variable() {
        let err = from_pairs(&[("LATE_THRESHOLD", "half past ten")]).unwrap_err();
        assert!(err.to_string().contains("LATE_THRESHOLD"));

        let err = from_pairs(&[("LOG_LEVEL", "loud")]).unwrap_err();
        assert!(err.to_string().contains("LOG_LEVEL"));
    }
}
