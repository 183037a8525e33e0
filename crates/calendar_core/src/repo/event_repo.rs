//! Event collection codec for the key-value slot.
//!
//! # Responsibility
//! - Decode the persisted JSON array into `Event` records, failing soft.
//! - Encode and write the complete collection in one slot write.
//!
//! # Invariants
//! - Reads never return an error: missing, unreadable, non-JSON or
//!   non-array slots all decode to an empty collection.
//! - Elements that do not match the `Event` schema are dropped, so memory
//!   and storage keep the same array-of-Event shape.
//! - Writes always serialize the full collection (no diffs).

use crate::model::event::Event;
use crate::repo::kv_store::{KeyValueStore, KvError};
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default slot key holding the serialized event array.
pub const EVENTS_STORAGE_KEY: &str = "calendar_events";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure while writing the event slot.
#[derive(Debug)]
pub enum RepoError {
    Encode(serde_json::Error),
    Storage(KvError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode events: {err}"),
            Self::Storage(err) => write!(f, "failed to write events: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

/// Reads the event collection stored under `key`.
pub fn load_events<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Vec<Event> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("event=events_load module=repo status=fallback reason=read_failed error={err}");
            return Vec::new();
        }
    };

    decode_events(&raw)
}

/// Writes the complete event collection under `key`.
pub fn save_events<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    events: &[Event],
) -> RepoResult<()> {
    let encoded = serde_json::to_string(events)?;
    store.set(key, &encoded)?;
    Ok(())
}

/// Decodes a raw slot value, failing soft.
pub fn decode_events(raw: &str) -> Vec<Event> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("event=events_load module=repo status=fallback reason=not_array");
            return Vec::new();
        }
        Err(_) => {
            warn!("event=events_load module=repo status=fallback reason=invalid_json");
            return Vec::new();
        }
    };

    let total = items.len();
    let events = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Event>(item).ok())
        .collect::<Vec<_>>();

    if events.len() != total {
        warn!(
            "event=events_load module=repo status=partial dropped={} kept={}",
            total - events.len(),
            events.len()
        );
    }

    events
}
