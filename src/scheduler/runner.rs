//! Homework status poller.
//!
//! Every period the poller:
//! 1. Fetches statuses changed since the cursor
//! 2. Moves the cursor to the server's `current_date`
//! 3. Validates the response and takes the most recent homework
//! 4. Formats its status and sends it, unless it repeats the last one
//!
//! Any failure inside an iteration is logged and reported to the chat,
//! then the poller waits for the next period as usual.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::PollState;
use crate::error::BotError;
use crate::practicum::{HomeworkApi, check_response, current_date, parse_status};
use crate::telegram::Notifier;

/// Text sent once when the bot starts.
pub const STARTUP_MESSAGE: &str = "Start";

/// Prefix of failure reports sent to the chat.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// Messages that can be sent to the poller.
#[derive(Debug, Clone)]
pub enum PollerMessage {
    /// Stop the poller.
    Shutdown,
}

/// Result of one poll iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The API reported no homework changes.
    NoNewHomework,
    /// A new status was sent to the chat.
    Notified,
    /// The status matched the last notification and was not resent.
    Unchanged,
    /// The iteration failed; a failure report was attempted.
    Failed,
}

/// Polls the review API and relays status changes.
pub struct StatusPoller<A, N> {
    /// Review API client.
    api: A,

    /// Chat notifier.
    notifier: N,

    /// Cursor and deduplication state.
    state: PollState,

    /// Pause between iterations.
    retry_period: Duration,
}

impl<A, N> StatusPoller<A, N>
where
    A: HomeworkApi,
    N: Notifier,
{
    /// Creates a new poller.
    #[must_use]
    pub fn new(api: A, notifier: N, state: PollState) -> Self {
        Self {
            api,
            notifier,
            state,
            retry_period: Duration::from_secs(600),
        }
    }

    /// Sets the pause between iterations.
    #[must_use]
    pub const fn with_retry_period(mut self, period: Duration) -> Self {
        self.retry_period = period;
        self
    }

    /// Announces that the bot is up.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::SendMessage`] if the chat is unreachable.
    pub async fn notify_startup(&self) -> Result<(), BotError> {
        self.notifier.send_message(STARTUP_MESSAGE).await
    }

    /// Runs the poll loop until a shutdown message arrives.
    pub async fn run(&mut self, mut rx: mpsc::Receiver<PollerMessage>) {
        info!(
            "Homework poller started, polling every {} seconds",
            self.retry_period.as_secs()
        );

        loop {
            self.poll_once().await;

            tokio::select! {
                () = tokio::time::sleep(self.retry_period) => {}
                msg = rx.recv() => {
                    match msg {
                        Some(PollerMessage::Shutdown) | None => {
                            info!("Poller shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Runs a single iteration, reporting any failure to the chat.
    pub async fn poll_once(&mut self) -> PollOutcome {
        match self.check_for_update().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Poll iteration failed: {:?}", e);
                self.report_failure(&e).await;
                PollOutcome::Failed
            }
        }
    }

    async fn check_for_update(&mut self) -> Result<PollOutcome, BotError> {
        debug!("Polling from {}", self.state.cursor_display());

        let response = self.api.fetch_statuses(self.state.cursor).await?;

        match current_date(&response) {
            Some(date) => self.state.advance_cursor(date),
            None => warn!(
                "Response has no usable current_date, keeping cursor at {}",
                self.state.cursor
            ),
        }

        let Some(homework) = check_response(&response)? else {
            debug!("No new homework statuses");
            return Ok(PollOutcome::NoNewHomework);
        };

        let message = parse_status(&homework)?;

        if self.state.is_repeat(&message) {
            debug!("Status has not changed since the last notification");
            return Ok(PollOutcome::Unchanged);
        }

        self.notifier.send_message(&message).await?;
        info!(
            "Sent status update for {:?}",
            homework.homework_name.as_deref().unwrap_or_default()
        );
        self.state.mark_sent(message);

        Ok(PollOutcome::Notified)
    }

    async fn report_failure(&self, err: &BotError) {
        let report = format!("{FAILURE_PREFIX}{err}");
        if let Err(send_err) = self.notifier.send_message(&report).await {
            error!("Failure report could not be delivered: {}", send_err);
        }
    }

    /// Gets a reference to the poll state.
    #[must_use]
    pub fn state(&self) -> &PollState {
        &self.state
    }
}

impl<A, N> std::fmt::Debug for StatusPoller<A, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusPoller")
            .field("state", &self.state)
            .field("retry_period", &self.retry_period)
            .finish_non_exhaustive()
    }
}
