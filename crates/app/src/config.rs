use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
/// Default location of the persisted local storage file.
pub const DEFAULT_STORAGE_PATH: &str = ".movietrack/local_storage.json";
/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a backend running locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL, without the `/movies` suffix.
    pub api_url: String,
    /// File holding the persisted key/value store (credential token).
    pub storage_path: PathBuf,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    Empty { var: &'static str },

    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                          |
    /// |-----------------------------------|----------------------------------|
    /// | `MOVIETRACK_API_URL`              | `http://127.0.0.1:8000`          |
    /// | `MOVIETRACK_STORAGE_PATH`         | `.movietrack/local_storage.json` |
    /// | `MOVIETRACK_REQUEST_TIMEOUT_SECS` | `30`                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("MOVIETRACK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        if api_url.trim().is_empty() {
            return Err(ConfigError::Empty {
                var: "MOVIETRACK_API_URL",
            });
        }

        let storage_path = lookup("MOVIETRACK_STORAGE_PATH")
            .unwrap_or_else(|| DEFAULT_STORAGE_PATH.into());
        if storage_path.trim().is_empty() {
            return Err(ConfigError::Empty {
                var: "MOVIETRACK_STORAGE_PATH",
            });
        }

        let request_timeout_secs = match lookup("MOVIETRACK_REQUEST_TIMEOUT_SECS") {
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: "MOVIETRACK_REQUEST_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            api_url: api_url.trim().to_string(),
            storage_path: PathBuf::from(storage_path),
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
