//! Shape checks for the review API response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BotError;

/// A single homework record as returned by the review API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homework {
    /// Name of the submitted work.
    #[serde(default)]
    pub homework_name: Option<String>,

    /// Review status code.
    #[serde(default)]
    pub status: Option<String>,

    /// Free-form comment left by the reviewer.
    #[serde(default)]
    pub reviewer_comment: Option<Value>,

    /// When the status last changed, in whatever form the server sent it.
    #[serde(default)]
    pub date_updated: Option<Value>,

    /// Lesson the work belongs to.
    #[serde(default)]
    pub lesson_name: Option<Value>,
}

impl Homework {
    /// Labelled display text of the informational fields that are present.
    ///
    /// These fields are never validated; strings are shown as-is and any
    /// other JSON value is shown in its compact form.
    #[must_use]
    pub fn details(&self) -> Vec<(&'static str, String)> {
        [
            ("Lesson", &self.lesson_name),
            ("Updated", &self.date_updated),
            ("Reviewer comment", &self.reviewer_comment),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| (label, render(v))))
        .collect()
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validates a response and extracts the most recent homework.
///
/// Returns `Ok(None)` when the `homeworks` list is empty, meaning nothing
/// changed since the cursor. Only the first record is returned; older
/// entries are ignored.
///
/// # Errors
///
/// Returns [`BotError::InvalidResponse`] if the response is not an object,
/// `homeworks` is missing or not an array, or its first entry is not an
/// object.
pub fn check_response(response: &Value) -> Result<Option<Homework>, BotError> {
    let Some(object) = response.as_object() else {
        return Err(BotError::InvalidResponse(format!(
            "expected an object, got {}",
            kind_of(response)
        )));
    };

    let homeworks = match object.get("homeworks") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(BotError::InvalidResponse(format!(
                "`homeworks` must be an array, got {}",
                kind_of(other)
            )));
        }
        None => {
            return Err(BotError::InvalidResponse(
                "`homeworks` key is missing".to_owned(),
            ));
        }
    };

    let Some(latest) = homeworks.first() else {
        return Ok(None);
    };

    if !latest.is_object() {
        return Err(BotError::InvalidResponse(format!(
            "homework record must be an object, got {}",
            kind_of(latest)
        )));
    }

    Homework::deserialize(latest)
        .map(Some)
        .map_err(|e| BotError::InvalidResponse(e.to_string()))
}

/// Extracts the next cursor from a response.
#[must_use]
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_returns_first_homework() {
        let response = json!({
            "homeworks": [
                {"homework_name": "hw3", "status": "reviewing"},
                {"homework_name": "hw2", "status": "approved"},
                {"homework_name": "hw1", "status": "rejected"}
            ],
            "current_date": 1700000000
        });
        let homework = check_response(&response).unwrap().unwrap();
        assert_eq!(homework.homework_name.as_deref(), Some("hw3"));
        assert_eq!(homework.status.as_deref(), Some("reviewing"));
    }

    #[test]
    fn test_single_homework() {
        let response = json!({"homeworks": [{"homework_name": "only", "status": "approved"}]});
        let homework = check_response(&response).unwrap().unwrap();
        assert_eq!(homework.homework_name.as_deref(), Some("only"));
    }

    #[test]
    fn test_empty_homeworks_is_not_an_error() {
        let response = json!({"homeworks": [], "current_date": 1000});
        assert_eq!(check_response(&response).unwrap(), None);
    }

    #[test]
    fn test_rejects_non_object() {
        let err = check_response(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, BotError::InvalidResponse(_)));
    }

    #[test]
    fn test_rejects_missing_homeworks() {
        let err = check_response(&json!({"current_date": 1})).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_rejects_non_array_homeworks() {
        let err = check_response(&json!({"homeworks": {"homework_name": "hw"}})).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_rejects_non_object_record() {
        let err = check_response(&json!({"homeworks": ["hw1"]})).unwrap_err();
        assert!(matches!(err, BotError::InvalidResponse(_)));
    }

    #[test]
    fn test_keeps_optional_fields() {
        let response = json!({"homeworks": [{
            "homework_name": "hw1",
            "status": "rejected",
            "reviewer_comment": "Fix the tests",
            "lesson_name": "Final project",
            "id": 123
        }]});
        let homework = check_response(&response).unwrap().unwrap();
        assert_eq!(
            homework.details(),
            vec![
                ("Lesson", "Final project".to_owned()),
                ("Reviewer comment", "Fix the tests".to_owned()),
            ]
        );
    }

    #[test]
    fn test_odd_typed_extra_fields_are_accepted() {
        let response = json!({"homeworks": [{
            "homework_name": "hw1",
            "status": "approved",
            "date_updated": 1700000000,
            "reviewer_comment": {"text": "ok"},
            "lesson_name": null
        }], "current_date": 1});
        let homework = check_response(&response).unwrap().unwrap();
        assert_eq!(homework.homework_name.as_deref(), Some("hw1"));
        assert_eq!(homework.status.as_deref(), Some("approved"));
        assert_eq!(
            homework.details(),
            vec![
                ("Updated", "1700000000".to_owned()),
                ("Reviewer comment", r#"{"text":"ok"}"#.to_owned()),
            ]
        );
    }

    #[test]
    fn test_non_string_name_is_rejected() {
        let response = json!({"homeworks": [{"homework_name": 7, "status": "approved"}]});
        let err = check_response(&response).unwrap_err();
        assert!(matches!(err, BotError::InvalidResponse(_)));
    }

    #[test]
    fn test_current_date() {
        assert_eq!(current_date(&json!({"current_date": 1000})), Some(1000));
        assert_eq!(current_date(&json!({"current_date": "soon"})), None);
        assert_eq!(current_date(&json!({})), None);
    }
}
