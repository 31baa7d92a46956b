//! Telegram notifier module.
//!
//! Sends status updates and failure reports to a single chat through
//! the Bot API.

mod client;

pub use client::{Notifier, TelegramNotifier};
