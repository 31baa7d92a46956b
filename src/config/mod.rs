//! Configuration module for the homework status bot.
//!
//! Handles loading the required credentials and the optional poller
//! settings from the environment.

mod settings;

pub use settings::{
    ConfigError, Credentials, PRACTICUM_TOKEN_VAR, PollerSettings, TELEGRAM_CHAT_ID_VAR,
    TELEGRAM_TOKEN_VAR,
};
