//! Homework Status Bot Library
//!
//! A Telegram bot that watches a homework review API and reports
//! status changes to a single chat.
//!
//! This crate provides the core functionality for:
//! - Loading credentials and poller settings from the environment
//! - Querying and validating the review API
//! - Formatting review verdicts
//! - Delivering notifications through the Telegram Bot API
//! - Writing a size-capped rotating log file

pub mod config;
pub mod error;
pub mod logging;
pub mod practicum;
pub mod scheduler;
pub mod telegram;
