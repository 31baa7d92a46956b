//! Homework review API module.
//!
//! Fetches status snapshots, validates their shape and turns the most
//! recent homework into a chat message.

mod client;
mod response;
mod status;

pub use client::{HomeworkApi, PracticumClient};
pub use response::{Homework, check_response, current_date};
pub use status::{HomeworkStatus, parse_status};
