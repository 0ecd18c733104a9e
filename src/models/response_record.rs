// src/models/response_record.rs

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::assessment::bank::{OptionKey, QuestionId};
use crate::utils::html::clean_text;

/// Raw answers as persisted: question id (as a string) to option key.
pub type AnswerMap = BTreeMap<String, String>;

/// Timestamp layout used in record bodies and file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern compiles"));

/// Respondent details captured once at the start of an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Identity {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name length must be between 1 and 100 characters."
    ))]
    pub name: String,
    #[validate(email(message = "Email address is not valid."))]
    pub email: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
}

impl Identity {
    /// Trims every field and strips markup from the free-text name.
    pub fn normalized(self) -> Self {
        Self {
            name: clean_text(self.name.trim()),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}

/// Accepts digits with an optional leading '+', ignoring spaces and dashes.
fn validate_phone(phone: &str) -> Result<(), validator::ValidationError> {
    let compact: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if !PHONE_RE.is_match(&compact) {
        return Err(validator::ValidationError::new("invalid_phone")
            .with_message("Phone number must contain 7 to 15 digits.".into()));
    }
    Ok(())
}

/// One submitted attempt, in the shape written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// `YYYYMMDD_HHMMSS` for records written here; ISO-8601 is accepted on read.
    pub timestamp: String,

    // Older files carry only the email.
    #[serde(default)]
    pub name: String,

    pub email: String,

    #[serde(default)]
    pub phone: String,

    pub responses: AnswerMap,
}

impl ResponseRecord {
    pub fn new(
        identity: &Identity,
        answers: &BTreeMap<QuestionId, OptionKey>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: submitted_at.format(TIMESTAMP_FORMAT).to_string(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            phone: identity.phone.clone(),
            responses: answers
                .iter()
                .map(|(id, key)| (id.to_string(), key.to_string()))
                .collect(),
        }
    }

    /// Parses `timestamp` in either accepted layout.
    pub fn submitted_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.timestamp)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
            .or_else(|| self.timestamp.parse::<NaiveDateTime>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn identity(phone: &str) -> Identity {
        Identity {
            name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            phone: phone.into(),
        }
    }

    #[test]
    fn accepts_common_phone_formats() {
        assert!(identity("9876543210").validate().is_ok());
        assert!(identity("+91 98765-43210").validate().is_ok());
        assert!(identity("12ab").validate().is_err());
    }

    #[test]
    fn rejects_bad_email() {
        let mut id = identity("9876543210");
        id.email = "not-an-email".into();
        assert!(id.validate().is_err());
    }

    #[test]
    fn normalized_strips_markup_from_name() {
        let mut id = identity("9876543210");
        id.name = "  <script>alert(1)</script>Asha  ".into();
        assert_eq!(id.normalized().name, "Asha");
    }

    #[test]
    fn record_uses_compact_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 10, 18, 9, 5, 7).unwrap();
        let mut answers = BTreeMap::new();
        answers.insert(3, OptionKey::B);

        let record = ResponseRecord::new(&identity("9876543210"), &answers, at);
        assert_eq!(record.timestamp, "20251018_090507");
        assert_eq!(record.responses.get("3").map(String::as_str), Some("b"));
        assert_eq!(record.submitted_at(), Some(at.naive_utc()));
    }

    #[test]
    fn reads_iso_timestamps_and_legacy_shape() {
        let raw = r#"{"timestamp": "2025-10-18T09:05:07Z", "email": "x@y.com", "responses": {"1": "a"}}"#;
        let record: ResponseRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.name, "");
        assert!(record.submitted_at().is_some());
    }
}
