//! Event store use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/query entry points over one event slot.
//! - Persist the complete collection after every effective mutation.
//!
//! # Invariants
//! - Event ids are unique within the store.
//! - A mutation becomes visible in memory only after its slot write
//!   succeeds; a failed write leaves memory exactly as before.
//! - `query` returns copies in insertion order.
//! - The store emits no notifications; callers re-query after mutating.

use crate::model::event::{Event, EventId, EventInput};
use crate::repo::event_repo::{load_events, save_events, RepoError, EVENTS_STORAGE_KEY};
use crate::repo::kv_store::KeyValueStore;
use chrono::Utc;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 2;

pub type StoreResult<T> = Result<T, StoreError>;

/// Mutation failure reported to the caller.
#[derive(Debug)]
pub enum StoreError {
    /// Every write attempt failed; in-memory state was not changed.
    PersistenceFailed { attempts: u32, source: RepoError },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersistenceFailed { attempts, source } => {
                write!(f, "persistence failed after {attempts} attempt(s): {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PersistenceFailed { source, .. } => Some(source),
        }
    }
}

/// Event store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStoreConfig {
    /// Slot key holding the serialized collection.
    pub storage_key: String,
    /// Slot write attempts per mutation; values below 1 behave as 1.
    pub max_write_attempts: u32,
}

impl Default for EventStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: EVENTS_STORAGE_KEY.to_string(),
            max_write_attempts: DEFAULT_MAX_WRITE_ATTEMPTS,
        }
    }
}

/// Authoritative owner of the event collection.
pub struct EventStore<S: KeyValueStore> {
    storage: S,
    config: EventStoreConfig,
    events: Vec<Event>,
}

impl<S: KeyValueStore> EventStore<S> {
    /// Opens a store on `storage` with default settings and loads the slot.
    pub fn open(storage: S) -> Self {
        Self::with_config(storage, EventStoreConfig::default())
    }

    /// Opens a store with explicit settings and loads the slot.
    pub fn with_config(storage: S, config: EventStoreConfig) -> Self {
        let events = load_events(&storage, &config.storage_key);
        info!(
            "event=store_open module=service status=ok count={}",
            events.len()
        );
        Self {
            storage,
            config,
            events,
        }
    }

    pub fn config(&self) -> &EventStoreConfig {
        &self.config
    }

    /// Re-reads the slot, replacing the in-memory collection.
    ///
    /// Never fails: unreadable slots yield an empty collection.
    pub fn load(&mut self) -> Vec<Event> {
        self.events = load_events(&self.storage, &self.config.storage_key);
        debug!(
            "event=store_load module=service status=ok count={}",
            self.events.len()
        );
        self.events.clone()
    }

    /// Current collection in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Events whose `date` equals `date`, in insertion order.
    pub fn query(&self, date: &str) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| event.date == date)
            .cloned()
            .collect()
    }

    /// Creates and persists a new event from (already validated) input.
    pub fn create(&mut self, input: &EventInput) -> StoreResult<Event> {
        let now = Utc::now();
        let event = Event::from_input(self.fresh_id(now), input, now);

        let mut next = self.events.clone();
        next.push(event.clone());
        self.commit(next, "create")?;

        info!(
            "event=event_create module=service status=ok id={}",
            event.id
        );
        Ok(event)
    }

    /// Replaces the editable fields of an existing event.
    ///
    /// Returns `Ok(None)` without writing when `id` is unknown.
    pub fn update(&mut self, id: &EventId, input: &EventInput) -> StoreResult<Option<Event>> {
        let Some(index) = self.events.iter().position(|event| &event.id == id) else {
            debug!("event=event_update module=service status=not_found id={id}");
            return Ok(None);
        };

        let mut next = self.events.clone();
        next[index].apply_input(input);
        let updated = next[index].clone();
        self.commit(next, "update")?;

        info!("event=event_update module=service status=ok id={id}");
        Ok(Some(updated))
    }

    /// Removes every event with `id`; unknown ids are a no-op without a write.
    pub fn delete(&mut self, id: &EventId) -> StoreResult<()> {
        if !self.events.iter().any(|event| &event.id == id) {
            debug!("event=event_delete module=service status=not_found id={id}");
            return Ok(());
        }

        let next = self
            .events
            .iter()
            .filter(|event| &event.id != id)
            .cloned()
            .collect::<Vec<_>>();
        self.commit(next, "delete")?;

        info!("event=event_delete module=service status=ok id={id}");
        Ok(())
    }

    fn commit(&mut self, next: Vec<Event>, operation: &'static str) -> StoreResult<()> {
        let attempts = self.config.max_write_attempts.max(1);
        let mut attempt = 1;
        loop {
            match save_events(&self.storage, &self.config.storage_key, &next) {
                Ok(()) => {
                    self.events = next;
                    return Ok(());
                }
                Err(err) if attempt < attempts => {
                    warn!(
                        "event=events_save module=service status=retry op={operation} attempt={attempt} error={err}"
                    );
                    attempt += 1;
                }
                Err(err) => {
                    error!(
                        "event=events_save module=service status=error op={operation} attempts={attempt} error={err}"
                    );
                    return Err(StoreError::PersistenceFailed {
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }

    fn fresh_id(&self, now: chrono::DateTime<Utc>) -> EventId {
        loop {
            let id = EventId::generate(now);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
