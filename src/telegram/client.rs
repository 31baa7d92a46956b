//! Telegram Bot API notifier.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, error, info};

use crate::config::Credentials;
use crate::error::BotError;

/// Delivers text messages to the configured chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message. No retry is attempted on failure.
    async fn send_message(&self, text: &str) -> Result<(), BotError>;
}

/// Notifier backed by a Telegram bot.
pub struct TelegramNotifier {
    /// The underlying teloxide bot.
    bot: Bot,

    /// Chat every notification goes to.
    recipient: Recipient,
}

impl TelegramNotifier {
    /// Creates a notifier for `chat_id` using the bot `token`.
    #[must_use]
    pub fn new(token: &str, chat_id: &str) -> Self {
        let recipient = parse_recipient(chat_id);
        info!("Notifications go to chat {}", describe_recipient(&recipient));

        Self {
            bot: Bot::new(token),
            recipient,
        }
    }

    /// Creates a notifier from loaded credentials.
    #[must_use]
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(&credentials.telegram_token, &credentials.chat_id)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<(), BotError> {
        debug!("Sending message: \"{}\"", truncate_for_log(text, 40));

        match self
            .bot
            .send_message(self.recipient.clone(), text.to_owned())
            .await
        {
            Ok(_message) => {
                debug!("Message sent");
                Ok(())
            }
            Err(e) => {
                error!("Message was not sent: {}", e);
                Err(BotError::SendMessage(e.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("recipient", &describe_recipient(&self.recipient))
            .finish_non_exhaustive()
    }
}

/// Numeric ids address chats directly; anything else is a channel username.
fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if chat_id.starts_with('@') => Recipient::ChannelUsername(chat_id.to_owned()),
        Err(_) => Recipient::ChannelUsername(format!("@{chat_id}")),
    }
}

fn describe_recipient(recipient: &Recipient) -> String {
    match recipient {
        Recipient::Id(id) => id.0.to_string(),
        Recipient::ChannelUsername(name) => name.clone(),
    }
}

/// Truncates a string for logging purposes.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_owned()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_chat_id() {
        assert_eq!(parse_recipient("123456"), Recipient::Id(ChatId(123_456)));
        assert_eq!(
            parse_recipient(" -1001234567890 "),
            Recipient::Id(ChatId(-1_001_234_567_890))
        );
    }

    #[test]
    fn test_parse_channel_username() {
        assert_eq!(
            parse_recipient("@homework_feed"),
            Recipient::ChannelUsername("@homework_feed".to_owned())
        );
        assert_eq!(
            parse_recipient("homework_feed"),
            Recipient::ChannelUsername("@homework_feed".to_owned())
        );
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("Hello", 10), "Hello");
        assert_eq!(truncate_for_log("Привет, мир!", 6), "Привет...");
    }
}
