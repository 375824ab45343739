//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local use.

use std::env;
use std::path::PathBuf;

/// Default weekly workout goal shown on the progress summary.
pub const DEFAULT_WEEKLY_GOAL: u32 = 5;

/// Which record store backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// One JSON file per key under `data_dir`.
    Directory,
    /// Process-local map; nothing survives exit.
    Memory,
}

impl std::str::FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "directory" | "dir" | "file" => Ok(StorageKind::Directory),
            "memory" | "mem" => Ok(StorageKind::Memory),
            other => Err(ConfigError::Invalid("PREHAB_STORAGE", other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the JSON documents
    pub data_dir: PathBuf,
    /// Store backend
    pub storage: StorageKind,
    /// Weekly workout goal for progress summaries
    pub weekly_goal: u32,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".prehab"),
            storage: StorageKind::Memory,
            weekly_goal: DEFAULT_WEEKLY_GOAL,
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage = match env::var("PREHAB_STORAGE") {
            Ok(value) => value.parse()?,
            Err(_) => StorageKind::Directory,
        };

        let weekly_goal = match env::var("PREHAB_WEEKLY_GOAL") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PREHAB_WEEKLY_GOAL", value))?,
            Err(_) => DEFAULT_WEEKLY_GOAL,
        };

        Ok(Self {
            data_dir: env::var("PREHAB_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".prehab")),
            storage,
            weekly_goal,
            log_json: env::var("PREHAB_LOG_JSON")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("PREHAB_DATA_DIR", "/tmp/prehab-config-test");
        env::set_var("PREHAB_STORAGE", "memory");
        env::set_var("PREHAB_WEEKLY_GOAL", "7");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.data_dir, PathBuf::from("/tmp/prehab-config-test"));
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.weekly_goal, 7);

        env::remove_var("PREHAB_DATA_DIR");
        env::remove_var("PREHAB_STORAGE");
        env::remove_var("PREHAB_WEEKLY_GOAL");
    }

    #[test]
    fn test_storage_kind_parse() {
        assert_eq!("Directory".parse::<StorageKind>().unwrap(), StorageKind::Directory);
        assert_eq!("mem".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert!("sqlite".parse::<StorageKind>().is_err());
    }
}
