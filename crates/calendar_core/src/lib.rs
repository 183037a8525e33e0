//! Core domain logic for the month calendar.
//! This crate is the single source of truth for event invariants.

pub mod db;
pub mod grid;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use grid::{build_month_grid, default_event_date, DayCell, EventLookup, GridError, MonthRef};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventId, EventInput};
pub use repo::event_repo::{RepoError, RepoResult, EVENTS_STORAGE_KEY};
pub use repo::kv_store::{
    InMemoryKeyValueStore, KeyValueStore, KvError, KvResult, SqliteKeyValueStore,
};
pub use service::event_store::{EventStore, EventStoreConfig, StoreError, StoreResult};
pub use validation::{validate_event, EventField, ValidationReport};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
