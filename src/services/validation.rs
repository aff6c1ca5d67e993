use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use super::error::ServiceError;

pub const ORGANIZATION_NAME_MAX: usize = 100;
pub const SLUG_MAX: usize = 50;
pub const PROJECT_NAME_MAX: usize = 200;
pub const TASK_TITLE_MAX: usize = 200;
pub const EMAIL_MAX: usize = 254;

/// Collects field errors so a request reports every bad field at once
#[derive(Debug, Default)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.entry(field.to_string()).or_insert_with(|| message.into());
    }

    /// Non-blank text of at most `max` characters
    pub fn required_text(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.add(field, "This field is required");
        } else {
            self.max_len(field, value, max);
        }
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("Must be at most {max} characters"));
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if !is_email_shaped(value) {
            self.add(field, "Enter a valid email address");
        } else {
            self.max_len(field, value, EMAIL_MAX);
        }
    }

    /// Blank means "unassigned" and is accepted
    pub fn optional_email(&mut self, field: &str, value: &str) {
        if !value.is_empty() {
            self.email(field, value);
        }
    }

    pub fn status<T>(&mut self, field: &str, value: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match value.parse::<T>() {
            Ok(status) => Some(status),
            Err(e) => {
                self.add(field, e.to_string());
                None
            }
        }
    }

    /// Calendar date, `YYYY-MM-DD`
    pub fn date(&mut self, field: &str, value: &str) -> Option<NaiveDate> {
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.add(field, format!("Invalid date '{value}', expected YYYY-MM-DD"));
                None
            }
        }
    }

    /// RFC 3339 timestamp, normalized to UTC
    pub fn timestamp(&mut self, field: &str, value: &str) -> Option<DateTime<Utc>> {
        match DateTime::parse_from_rfc3339(value) {
            Ok(ts) => Some(ts.with_timezone(&Utc)),
            Err(_) => {
                self.add(field, format!("Invalid timestamp '{value}', expected RFC 3339"));
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), ServiceError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(self.errors))
        }
    }
}

/// Shape check only: one `@`, non-empty local part, dotted domain, no whitespace
pub fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskStatus;

    #[test]
    fn email_shapes() {
        assert!(is_email_shaped("kim@acme.test"));
        assert!(is_email_shaped("first.last+tag@mail.acme.io"));
        assert!(!is_email_shaped("kim"));
        assert!(!is_email_shaped("@acme.test"));
        assert!(!is_email_shaped("kim@acme"));
        assert!(!is_email_shaped("kim@@acme.test"));
        assert!(!is_email_shaped("kim@acme..test"));
        assert!(!is_email_shaped("kim @acme.test"));
    }

    #[test]
    fn collects_every_field_error() {
        let mut v = Validator::new();
        v.required_text("title", "   ", TASK_TITLE_MAX);
        let status: Option<TaskStatus> = v.status("status", "BLOCKED");
        v.optional_email("assignee_email", "");
        assert!(status.is_none());

        match v.finish() {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.contains_key("title"));
                assert!(errors.contains_key("status"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn parses_dates_and_timestamps() {
        let mut v = Validator::new();
        assert!(v.date("due_date", "2026-03-01").is_some());
        let ts = v.timestamp("due_date", "2026-03-01T09:30:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-03-01T07:30:00+00:00");
        assert!(v.finish().is_ok());

        let mut v = Validator::new();
        assert!(v.date("due_date", "03/01/2026").is_none());
        assert!(v.finish().is_err());
    }

    #[test]
    fn length_limit_counts_chars() {
        let mut v = Validator::new();
        v.required_text("name", &"é".repeat(PROJECT_NAME_MAX), PROJECT_NAME_MAX);
        assert!(v.finish().is_ok());
    }
}
