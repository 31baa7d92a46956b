//! Review statuses and the messages announcing them.

use std::fmt;
use std::str::FromStr;

use super::Homework;
use crate::error::BotError;

/// Review status of a homework submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    /// The reviewer accepted the work.
    Approved,
    /// A reviewer picked the work up.
    Reviewing,
    /// The reviewer sent the work back with remarks.
    Rejected,
}

impl HomeworkStatus {
    /// Wire code used by the review API.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict shown in the chat.
    #[must_use]
    pub const fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(BotError::UnknownStatus(other.to_owned())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Builds the notification text for a homework record.
///
/// # Errors
///
/// Returns [`BotError::MissingKey`] when `homework_name` or `status` is
/// absent, and [`BotError::UnknownStatus`] for a status outside the
/// verdict table.
pub fn parse_status(homework: &Homework) -> Result<String, BotError> {
    let name = homework
        .homework_name
        .as_deref()
        .ok_or(BotError::MissingKey("homework_name"))?;
    let status: HomeworkStatus = homework
        .status
        .as_deref()
        .ok_or(BotError::MissingKey("status"))?
        .parse()?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn homework(name: Option<&str>, status: Option<&str>) -> Homework {
        Homework {
            homework_name: name.map(str::to_owned),
            status: status.map(str::to_owned),
            ..Homework::default()
        }
    }

    #[test]
    fn test_approved_message() {
        let message = parse_status(&homework(Some("hw1"), Some("approved"))).unwrap();
        assert_eq!(
            message,
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_every_status_has_a_verdict() {
        for status in [
            HomeworkStatus::Approved,
            HomeworkStatus::Reviewing,
            HomeworkStatus::Rejected,
        ] {
            let parsed: HomeworkStatus = status.code().parse().unwrap();
            assert_eq!(parsed, status);
            let message = parse_status(&homework(Some("hw"), Some(status.code()))).unwrap();
            assert!(message.ends_with(status.verdict()));
        }
    }

    #[test]
    fn test_unknown_status() {
        let err = parse_status(&homework(Some("hw1"), Some("lost"))).unwrap_err();
        assert!(matches!(err, BotError::UnknownStatus(s) if s == "lost"));
    }

    #[test]
    fn test_status_codes_are_case_sensitive() {
        assert!("Approved".parse::<HomeworkStatus>().is_err());
    }

    #[test]
    fn test_missing_name() {
        let err = parse_status(&homework(None, Some("approved"))).unwrap_err();
        assert!(matches!(err, BotError::MissingKey("homework_name")));
    }

    #[test]
    fn test_missing_status() {
        let err = parse_status(&homework(Some("hw1"), None)).unwrap_err();
        assert!(matches!(err, BotError::MissingKey("status")));
    }

    #[test]
    fn test_empty_record_fails() {
        assert!(parse_status(&Homework::default()).is_err());
    }

    #[test]
    fn test_formatting_is_stable() {
        let record = homework(Some("hw2"), Some("rejected"));
        assert_eq!(parse_status(&record).unwrap(), parse_status(&record).unwrap());
    }
}
