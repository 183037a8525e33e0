//! Event form validation.
//!
//! # Responsibility
//! - Turn raw `EventInput` into field-level error messages.
//! - Report every applicable field error in one pass.
//!
//! # Invariants
//! - Validation is pure: no storage, clock or logging access.
//! - At most one message per field; `title` required wins over length.
//! - Date checks are format-only (`2024-02-30` passes).

use crate::model::event::{EventInput, TITLE_MAX_CHARS};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TITLE_REQUIRED: &str = "Title is required.";
pub const TITLE_TOO_LONG: &str = "Title must be 100 characters or less.";
pub const DATE_REQUIRED: &str = "Date is required.";
pub const DATE_INVALID_FORMAT: &str = "Invalid date format.";

// ASCII digits only; `\d` would also accept other Unicode digits.
static DATE_FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

/// Form field that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    Title,
    Date,
}

impl EventField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
        }
    }
}

/// Validation outcome returned as data, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// `true` iff `errors` is empty.
    pub is_valid: bool,
    pub errors: BTreeMap<EventField, String>,
}

impl ValidationReport {
    fn from_errors(errors: BTreeMap<EventField, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Message for one field, if that field failed.
    pub fn error_for(&self, field: EventField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// Validates event form input.
pub fn validate_event(input: &EventInput) -> ValidationReport {
    let mut errors = BTreeMap::new();

    if let Some(message) = title_error(&input.title) {
        errors.insert(EventField::Title, message.to_string());
    }
    if let Some(message) = date_error(&input.date) {
        errors.insert(EventField::Date, message.to_string());
    }

    ValidationReport::from_errors(errors)
}

fn title_error(title: &str) -> Option<&'static str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Some(TITLE_REQUIRED);
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Some(TITLE_TOO_LONG);
    }
    None
}

fn date_error(date: &str) -> Option<&'static str> {
    if date.is_empty() {
        return Some(DATE_REQUIRED);
    }
    if !DATE_FORMAT_RE.is_match(date) {
        return Some(DATE_INVALID_FORMAT);
    }
    None
}
