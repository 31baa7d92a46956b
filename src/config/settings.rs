//! Credentials and poller settings loaded from the environment.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable holding the review API token.
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";

/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";

/// Environment variable holding the destination chat.
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// The three secrets the bot cannot start without.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth token for the homework review API.
    pub practicum_token: String,

    /// Telegram Bot API token.
    pub telegram_token: String,

    /// Chat that receives notifications (numeric id or `@channel`).
    pub chat_id: String,
}

impl Credentials {
    /// Loads credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVars`] listing every variable that
    /// is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads credentials through an arbitrary variable lookup.
    ///
    /// Checks all three variables before failing so the operator sees the
    /// full list of what is missing at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| {
            let value = lookup(name).filter(|v| !v.trim().is_empty());
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let practicum_token = read(PRACTICUM_TOKEN_VAR);
        let telegram_token = read(TELEGRAM_TOKEN_VAR);
        let chat_id = read(TELEGRAM_CHAT_ID_VAR);

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnvVars(missing));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &mask_token(&self.practicum_token))
            .field("telegram_token", &mask_token(&self.telegram_token))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Poller and logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerSettings {
    /// Review API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Pause between two polls in seconds.
    #[serde(default = "default_retry_period")]
    pub retry_period_secs: u64,

    /// Timeout for a single API request in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Directory for rotated log files.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Size at which the log file is rotated, in bytes.
    #[serde(default = "default_log_max_bytes")]
    pub log_max_bytes: usize,

    /// Number of rotated log files to keep.
    #[serde(default = "default_log_max_files")]
    pub log_max_files: usize,
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_owned()
}

fn default_retry_period() -> u64 {
    600 // 10 minutes between polls
}

fn default_http_timeout() -> u64 {
    30
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_max_bytes() -> usize {
    50_000_000
}

fn default_log_max_files() -> usize {
    5
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            retry_period_secs: default_retry_period(),
            http_timeout_secs: default_http_timeout(),
            log_dir: default_log_dir(),
            log_max_bytes: default_log_max_bytes(),
            log_max_files: default_log_max_files(),
        }
    }
}

impl PollerSettings {
    /// Creates poller settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates poller settings through an arbitrary variable lookup.
    ///
    /// Empty values, zeros and values that fail to parse fall back to
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let positive = |name: &str| {
            text(name)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|&n| n > 0)
        };
        let positive_usize = |name: &str| positive(name).and_then(|n| usize::try_from(n).ok());

        Self {
            endpoint: text("PRACTICUM_ENDPOINT")
                .map_or_else(default_endpoint, |s| s.trim().to_owned()),
            retry_period_secs: positive("RETRY_PERIOD_SECS").unwrap_or_else(default_retry_period),
            http_timeout_secs: positive("HTTP_TIMEOUT_SECS").unwrap_or_else(default_http_timeout),
            log_dir: text("LOG_DIR").map_or_else(default_log_dir, PathBuf::from),
            log_max_bytes: positive_usize("LOG_MAX_BYTES").unwrap_or_else(default_log_max_bytes),
            log_max_files: positive_usize("LOG_MAX_FILES").unwrap_or_else(default_log_max_files),
        }
    }

    /// Path of the active log file.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("homework_bot.log")
    }

    /// Pause between polls.
    #[must_use]
    pub const fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    /// Timeout applied to every API request.
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<&'static str>),
}

/// Masks a secret for logging (shows last 4 characters).
fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count > 8 {
        let tail: String = token.chars().skip(count - 4).collect();
        format!("***{tail}")
    } else {
        "****".to_owned()
    }
}
