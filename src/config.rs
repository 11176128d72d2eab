//! Runtime configuration read from the environment.

use std::path::PathBuf;

use crate::GlycoscopeError;

const DEFAULT_DATA_PATH: &str = "data/processed/diabetes_cleaned.csv";
const DEFAULT_LOG_FILE: &str = "glycoscope.log";
const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns the screen), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Whether to log to a file, given whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

impl std::str::FromStr for LogMode {
    type Err = GlycoscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            other => Err(GlycoscopeError::Config(format!(
                "GLYCOSCOPE_LOG_MODE must be auto, file or stdout (got {other:?})"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
    pub preview_rows: usize,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`GlycoscopeError::Config`] for malformed values.
    pub fn from_env() -> Result<Self, GlycoscopeError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Read configuration through `get`, so tests can supply values without
    /// touching the process environment.
    ///
    /// # Errors
    /// Returns [`GlycoscopeError::Config`] for malformed values.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, GlycoscopeError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_path = get("GLYCOSCOPE_DATA_PATH").map_or(defaults.data_path, PathBuf::from);
        let log_file = get("GLYCOSCOPE_LOG_FILE").map_or(defaults.log_file, PathBuf::from);

        let log_mode = match get("GLYCOSCOPE_LOG_MODE") {
            Some(raw) => raw.parse::<LogMode>()?,
            None => defaults.log_mode,
        };

        let preview_rows = match get("GLYCOSCOPE_PREVIEW_ROWS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    GlycoscopeError::Config(format!(
                        "GLYCOSCOPE_PREVIEW_ROWS must be a positive integer (got {raw:?})"
                    ))
                })?,
            None => defaults.preview_rows,
        };

        Ok(Self {
            data_path,
            preview_rows,
            log_mode,
            log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        let cfg = Config::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.data_path, PathBuf::from("data/processed/diabetes_cleaned.csv"));
    }

    #[test]
    fn test_from_env_reads_values() {
        let get = |k: &str| match k {
            "GLYCOSCOPE_DATA_PATH" => Some("/srv/pima.csv".into()),
            "GLYCOSCOPE_PREVIEW_ROWS" => Some("25".into()),
            "GLYCOSCOPE_LOG_MODE" => Some("STDOUT".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.data_path, PathBuf::from("/srv/pima.csv"));
        assert_eq!(cfg.preview_rows, 25);
        assert_eq!(cfg.log_mode, LogMode::Stdout);
        assert_eq!(cfg.log_file, PathBuf::from("glycoscope.log"));
    }

    #[test]
    fn test_from_env_rejects_bad_values() {
        let zero_rows = |k: &str| (k == "GLYCOSCOPE_PREVIEW_ROWS").then(|| "0".to_string());
        assert!(matches!(
            Config::from_env_with(zero_rows),
            Err(GlycoscopeError::Config(_))
        ));

        let bad_mode = |k: &str| (k == "GLYCOSCOPE_LOG_MODE").then(|| "syslog".to_string());
        assert!(Config::from_env_with(bad_mode).is_err());
    }

    #[test]
    fn test_log_mode_auto_follows_terminal() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
