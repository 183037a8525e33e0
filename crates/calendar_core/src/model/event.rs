//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical calendar entry persisted in the event slot.
//! - Normalize raw form input into stored field values.
//!
//! # Invariants
//! - `title` is trimmed and at most `TITLE_MAX_CHARS` characters.
//! - `description` is trimmed and at most `DESCRIPTION_MAX_CHARS` characters.
//! - `time` is either empty or the caller-provided `HH:MM` string.
//! - Lengths are counted in Unicode scalar values, never bytes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Maximum stored title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum stored description length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

const EVENT_ID_PREFIX: &str = "evt";

/// Opaque event identifier.
///
/// Serialized as a plain JSON string so persisted slots stay readable by
/// any consumer of the `[{id, ...}]` array format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Generates a fresh id from a wall-clock component and a random component.
    ///
    /// Format: `evt_<unix-millis>_<uuid-v4-simple>`. Uniqueness is
    /// probabilistic and not cryptographic.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(format!(
            "{EVENT_ID_PREFIX}_{}_{}",
            now.timestamp_millis(),
            Uuid::new_v4().simple()
        ))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Raw event form input, before validation and normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInput {
    pub title: String,
    /// Expected as `YYYY-MM-DD`; checked by the validator, not here.
    pub date: String,
    /// Optional `HH:MM`; `None` and empty are equivalent.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EventInput {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            time: None,
            description: None,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Canonical calendar entry.
///
/// Field names serialize in camelCase (`createdAt`) to match the persisted
/// slot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM` or empty.
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Builds a new event from form input with store-assigned identity.
    pub fn from_input(id: EventId, input: &EventInput, created_at: DateTime<Utc>) -> Self {
        let mut event = Self {
            id,
            title: String::new(),
            date: String::new(),
            time: String::new(),
            description: String::new(),
            created_at,
        };
        event.apply_input(input);
        event
    }

    /// Overwrites the user-editable fields with normalized input.
    ///
    /// # Invariants
    /// - `id` and `created_at` are left untouched.
    pub fn apply_input(&mut self, input: &EventInput) {
        self.title = normalize_title(&input.title);
        self.date = input.date.clone();
        self.time = input.time.clone().unwrap_or_default();
        self.description = normalize_description(input.description.as_deref().unwrap_or(""));
    }

    /// Short label shown on a day cell: `"HH:MM Title"` or just the title.
    pub fn display_label(&self) -> String {
        if self.time.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.time, self.title)
        }
    }
}

/// Trims and silently truncates a title to `TITLE_MAX_CHARS`.
pub fn normalize_title(raw: &str) -> String {
    truncate_chars(raw.trim(), TITLE_MAX_CHARS)
}

/// Trims and silently truncates a description to `DESCRIPTION_MAX_CHARS`.
pub fn normalize_description(raw: &str) -> String {
    truncate_chars(raw.trim(), DESCRIPTION_MAX_CHARS)
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
