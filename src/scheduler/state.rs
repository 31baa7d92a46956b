//! Poll loop state.

use chrono::DateTime;

/// In-memory state of the poll loop. Lost on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// Unix timestamp the next poll asks changes from.
    pub cursor: i64,

    /// Text of the last status notification delivered.
    pub last_message: Option<String>,
}

impl PollState {
    /// Creates a state starting from the given cursor.
    #[must_use]
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_message: None,
        }
    }

    /// Moves the cursor forward to the server's `current_date`.
    pub fn advance_cursor(&mut self, current_date: i64) {
        self.cursor = current_date;
    }

    /// Checks whether `message` repeats the last delivered notification.
    #[must_use]
    pub fn is_repeat(&self, message: &str) -> bool {
        self.last_message.as_deref() == Some(message)
    }

    /// Records a successfully delivered notification.
    pub fn mark_sent(&mut self, message: String) {
        self.last_message = Some(message);
    }

    /// Cursor rendered as a UTC date for logs.
    #[must_use]
    pub fn cursor_display(&self) -> String {
        format_timestamp(self.cursor)
    }
}

/// Formats a unix timestamp as a UTC date, falling back to the raw number.
#[must_use]
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0).map_or_else(
        || timestamp.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = PollState::default();
        assert_eq!(state.cursor, 0);
        assert!(state.last_message.is_none());
    }

    #[test]
    fn test_repeat_detection() {
        let mut state = PollState::new(0);
        assert!(!state.is_repeat("status"));

        state.mark_sent("status".to_owned());
        assert!(state.is_repeat("status"));
        assert!(!state.is_repeat("other status"));
    }

    #[test]
    fn test_advance_cursor() {
        let mut state = PollState::new(0);
        state.advance_cursor(1000);
        assert_eq!(state.cursor, 1000);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_timestamp(1_700_000_000), "2023-11-14 22:13:20 UTC");
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }
}
