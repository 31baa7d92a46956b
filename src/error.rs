//! Errors raised while polling the review API and relaying statuses.

use thiserror::Error;

/// Errors that can occur while talking to the review API or the chat.
///
/// The `Display` text of the per-poll variants ends up verbatim in the
/// failure notification sent to the chat.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Failed to set up HTTP client: {0}")]
    HttpClientSetup(String),

    #[error("Review API request failed: {0}")]
    ApiAnswer(String),

    #[error("Review API returned unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("Malformed API response: {0}")]
    InvalidResponse(String),

    #[error("Homework record has no `{0}` key")]
    MissingKey(&'static str),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Failed to send message: {0}")]
    SendMessage(String),
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::ApiAnswer(format!("request timed out: {err}"));
        }
        Self::ApiAnswer(err.to_string())
    }
}
