use crate::calendar::{HolidayCalendar, HolidayCalendarConfig};
use std::fs::File;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const HTTP_ADDR_VAR: &str = "TURMA_HTTP_ADDR";
pub const HOLIDAYS_FILE_VAR: &str = "TURMA_HOLIDAYS_FILE";
pub const LOG_VERBOSITY_VAR: &str = "TURMA_LOG_VERBOSITY";

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LOG_VERBOSITY: u8 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TURMA_HTTP_ADDR='{value}' is not a socket address")]
    InvalidAddr { value: String },
    #[error("TURMA_LOG_VERBOSITY='{value}' must be a number between 0 and 3")]
    InvalidVerbosity { value: String },
    #[error("cannot read holiday file {path:?}: {source}")]
    HolidayFileIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid holiday file {path:?}: {source}")]
    HolidayFileFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Process settings, read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    /// JSON file in `HolidayCalendarConfig` form; the built-in list is used when unset.
    pub holidays_path: Option<PathBuf>,
    pub log_verbosity: u8,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_raw = lookup(HTTP_ADDR_VAR).unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let http_addr = addr_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr {
                value: addr_raw.clone(),
            })?;

        let holidays_path = lookup(HOLIDAYS_FILE_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_verbosity = match lookup(LOG_VERBOSITY_VAR) {
            None => DEFAULT_LOG_VERBOSITY,
            Some(value) => match value.trim().parse::<u8>() {
                Ok(level) if level <= 3 => level,
                _ => return Err(ConfigError::InvalidVerbosity { value }),
            },
        };

        Ok(Self {
            http_addr,
            holidays_path,
            log_verbosity,
        })
    }

    pub fn load_calendar(&self) -> Result<HolidayCalendar, ConfigError> {
        let Some(path) = &self.holidays_path else {
            return Ok(HolidayCalendar::default());
        };
        let file = File::open(path).map_err(|source| ConfigError::HolidayFileIo {
            path: path.clone(),
            source,
        })?;
        let config: HolidayCalendarConfig =
            serde_json::from_reader(file).map_err(|source| ConfigError::HolidayFileFormat {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = ?path, holidays = config.holidays().len(), "loaded holiday calendar");
        Ok(HolidayCalendar::from_config(&config))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR
                .parse()
                .expect("default address is well formed"),
            holidays_path: None,
            log_verbosity: DEFAULT_LOG_VERBOSITY,
        }
    }
}
