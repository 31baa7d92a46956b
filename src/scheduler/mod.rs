//! Status polling module.
//!
//! Drives the poll/compare/notify loop and owns its in-memory state.

mod runner;
mod state;

pub use runner::{FAILURE_PREFIX, PollOutcome, PollerMessage, STARTUP_MESSAGE, StatusPoller};
pub use state::{PollState, format_timestamp};
