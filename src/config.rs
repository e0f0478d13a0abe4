use chrono::{Local, NaiveDate};
use std::{env, path::PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_API_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub api_timeout_ms: u64,
    pub session_path: PathBuf,
    /// Date preselected by the report and dashboard pages when none is given.
    pub default_date: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_timeout_ms: DEFAULT_API_TIMEOUT_MS,
            session_path: PathBuf::from("data/session.json"),
            default_date: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let api_base_url = env::var("LALIN_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.api_base_url);

        let api_timeout_ms = env::var("LALIN_API_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.api_timeout_ms);

        let session_path = env::var("LALIN_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_path);

        let default_date = env::var("LALIN_DEFAULT_DATE")
            .ok()
            .and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok());

        Self {
            port,
            api_base_url,
            api_timeout_ms,
            session_path,
            default_date,
        }
    }

    pub fn default_date_string(&self) -> String {
        self.default_date
            .unwrap_or_else(|| Local::now().date_naive())
            .format("%Y-%m-%d")
            .to_string()
    }
}
