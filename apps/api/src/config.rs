use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on request bodies, resume uploads included.
    pub max_upload_bytes: usize,
    /// Idle time after which a session is dropped. Submits, metric reads and report
    /// downloads all count as activity. `None` keeps sessions for the lifetime of the process.
    pub session_ttl: Option<Duration>,
    pub session_sweep_interval: Duration,
    /// Optional prompt file (one question per line) replacing the built-in bank.
    pub questions_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 5000,
            rust_log: "info".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            session_ttl: None,
            session_sweep_interval: Duration::from_secs(60),
            questions_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT")?.unwrap_or(defaults.port),
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes),
            session_ttl: parse_env::<u64>("SESSION_TTL_SECS")?.map(Duration::from_secs),
            session_sweep_interval: parse_env::<u64>("SESSION_SWEEP_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_sweep_interval),
            questions_path: std::env::var_os("QUESTIONS_PATH").map(PathBuf::from),
        })
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(None),
    }
}
