//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the calendar use-cases (load/create/update/delete/query,
//!   month grid, validation) to Dart via FRB.
//! - Translate core types into flat DTOs with string fields.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Store access is serialized process-wide; each call reopens the slot,
//!   so callers always observe the latest persisted collection.
//! - `create_event`/`update_event` validate before touching storage.

use calendar_core::db::open_db;
use calendar_core::{
    build_month_grid as build_month_grid_inner, core_version as core_version_inner,
    default_log_level as default_log_level_inner, init_logging as init_logging_inner,
    ping as ping_inner, validate_event as validate_event_inner, DayCell, Event, EventId,
    EventInput, EventStore, MonthRef, SqliteKeyValueStore, ValidationReport,
};
use chrono::{Local, SecondsFormat};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const CALENDAR_DB_FILE_NAME: &str = "calendar_events.sqlite3";
static CALENDAR_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Log level the UI should pass to `init_logging` when the user has not
/// chosen one: `debug` for debug builds, `info` for release builds.
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// Pins the calendar database file used by every store call.
///
/// Must run before the first store call; otherwise a file in the system
/// temp directory is used.
///
/// # FFI contract
/// - Returns empty string on success (including repeating the same path).
/// - Returns an error message for empty paths or a conflicting path.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = CALENDAR_DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "store already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Event form payload sent by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventInputDto {
    pub title: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`; `None` or empty for all-day entries.
    pub time: Option<String>,
    pub description: Option<String>,
}

/// Event as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDto {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub description: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub created_at: String,
    /// Pill text: `"HH:MM Title"` or `"Title"`.
    pub label: String,
}

/// One field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorDto {
    /// `title` or `date`.
    pub field: String,
    pub message: String,
}

/// Result of `validate_event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResponse {
    pub is_valid: bool,
    pub errors: Vec<FieldErrorDto>,
}

/// Envelope for list-returning calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    pub ok: bool,
    pub items: Vec<EventDto>,
    /// Human-readable diagnostics message.
    pub message: String,
}

/// Envelope for create/update/delete calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Created or updated event, when applicable.
    pub event: Option<EventDto>,
    /// Non-empty only when input validation failed.
    pub field_errors: Vec<FieldErrorDto>,
    pub message: String,
}

impl EventActionResponse {
    fn success(message: impl Into<String>, event: Option<EventDto>) -> Self {
        Self {
            ok: true,
            event,
            field_errors: Vec::new(),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            event: None,
            field_errors: Vec::new(),
            message: message.into(),
        }
    }

    fn invalid(report: &ValidationReport) -> Self {
        Self {
            ok: false,
            event: None,
            field_errors: to_field_errors(report),
            message: "Please fix the highlighted fields.".to_string(),
        }
    }
}

/// One rendered calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCellDto {
    pub day_number: u32,
    pub date: String,
    pub is_other_month: bool,
    pub is_today: bool,
    pub events: Vec<EventDto>,
}

/// Month grid envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGridResponse {
    pub ok: bool,
    /// Header text such as `March 2024`; empty on failure.
    pub label: String,
    pub cells: Vec<DayCellDto>,
    pub message: String,
}

/// Loads all events in insertion order.
///
/// # FFI contract
/// - Never panics; unreadable storage yields an empty, successful list.
#[flutter_rust_bridge::frb(sync)]
pub fn load_events() -> EventListResponse {
    match with_event_store(|store| Ok(store.load())) {
        Ok(events) => list_response(events),
        Err(err) => list_failure(format!("load_events failed: {err}")),
    }
}

/// Validates and creates an event.
///
/// # FFI contract
/// - Invalid input returns `ok=false` with `field_errors`; nothing is stored.
/// - Persistence failures return `ok=false` with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn create_event(input: EventInputDto) -> EventActionResponse {
    let input = to_event_input(input);
    let report = validate_event_inner(&input);
    if !report.is_valid {
        return EventActionResponse::invalid(&report);
    }

    match with_event_store(|store| store.create(&input).map_err(|err| err.to_string())) {
        Ok(event) => EventActionResponse::success("Event created.", Some(to_event_dto(&event))),
        Err(err) => action_failure("create_event", err),
    }
}

/// Validates and updates an existing event.
///
/// # FFI contract
/// - Unknown ids return `ok=false` with message `Event not found.`.
#[flutter_rust_bridge::frb(sync)]
pub fn update_event(id: String, input: EventInputDto) -> EventActionResponse {
    let input = to_event_input(input);
    let report = validate_event_inner(&input);
    if !report.is_valid {
        return EventActionResponse::invalid(&report);
    }

    let id = EventId::from(id);
    match with_event_store(|store| store.update(&id, &input).map_err(|err| err.to_string())) {
        Ok(Some(event)) => {
            EventActionResponse::success("Event updated.", Some(to_event_dto(&event)))
        }
        Ok(None) => EventActionResponse::failure("Event not found."),
        Err(err) => action_failure("update_event", err),
    }
}

/// Deletes an event; unknown ids succeed as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_event(id: String) -> EventActionResponse {
    let id = EventId::from(id);
    match with_event_store(|store| store.delete(&id).map_err(|err| err.to_string())) {
        Ok(()) => EventActionResponse::success("Event deleted.", None),
        Err(err) => action_failure("delete_event", err),
    }
}

/// Events on `date` (`YYYY-MM-DD`) in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn get_events_for_date(date: String) -> EventListResponse {
    match with_event_store(|store| Ok(store.query(date.trim()))) {
        Ok(events) => list_response(events),
        Err(err) => list_failure(format!("get_events_for_date failed: {err}")),
    }
}

/// Builds the Sunday-first grid for `year`/`month` (1-indexed).
///
/// `is_today` is computed from the host's local clock.
#[flutter_rust_bridge::frb(sync)]
pub fn build_month_grid(year: i32, month: u32) -> MonthGridResponse {
    let month_ref = match MonthRef::new(year, month) {
        Ok(month_ref) => month_ref,
        Err(err) => return grid_failure(format!("build_month_grid failed: {err}")),
    };
    let today = Local::now().date_naive();

    match with_event_store(|store| Ok(build_month_grid_inner(month_ref, today, &*store))) {
        Ok(cells) => MonthGridResponse {
            ok: true,
            label: month_ref.label(),
            cells: cells.iter().map(to_day_cell_dto).collect(),
            message: String::new(),
        },
        Err(err) => grid_failure(format!("build_month_grid failed: {err}")),
    }
}

/// Validates form input without touching storage.
#[flutter_rust_bridge::frb(sync)]
pub fn validate_event(input: EventInputDto) -> ValidationResponse {
    let report = validate_event_inner(&to_event_input(input));
    ValidationResponse {
        is_valid: report.is_valid,
        errors: to_field_errors(&report),
    }
}

fn resolve_db_path() -> PathBuf {
    CALENDAR_DB_PATH
        .get_or_init(|| std::env::temp_dir().join(CALENDAR_DB_FILE_NAME))
        .clone()
}

fn with_event_store<T>(
    f: impl FnOnce(&mut EventStore<SqliteKeyValueStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let _guard = STORE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let conn =
        open_db(resolve_db_path()).map_err(|err| format!("calendar DB open failed: {err}"))?;
    let mut store = EventStore::open(SqliteKeyValueStore::new(&conn));
    f(&mut store)
}

fn action_failure(operation: &str, err: String) -> EventActionResponse {
    warn!("event=ffi_call module=ffi status=error op={operation} error={err}");
    EventActionResponse::failure(format!("{operation} failed: {err}"))
}

fn list_response(events: Vec<Event>) -> EventListResponse {
    EventListResponse {
        ok: true,
        message: format!("Found {} event(s).", events.len()),
        items: events.iter().map(to_event_dto).collect(),
    }
}

fn list_failure(message: String) -> EventListResponse {
    warn!("event=ffi_call module=ffi status=error error={message}");
    EventListResponse {
        ok: false,
        items: Vec::new(),
        message,
    }
}

fn grid_failure(message: String) -> MonthGridResponse {
    warn!("event=ffi_call module=ffi status=error error={message}");
    MonthGridResponse {
        ok: false,
        label: String::new(),
        cells: Vec::new(),
        message,
    }
}

fn to_event_input(dto: EventInputDto) -> EventInput {
    EventInput {
        title: dto.title,
        date: dto.date,
        time: dto.time.filter(|time| !time.is_empty()),
        description: dto.description,
    }
}

fn to_event_dto(event: &Event) -> EventDto {
    EventDto {
        id: event.id.to_string(),
        title: event.title.clone(),
        date: event.date.clone(),
        time: event.time.clone(),
        description: event.description.clone(),
        created_at: event.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        label: event.display_label(),
    }
}

fn to_day_cell_dto(cell: &DayCell) -> DayCellDto {
    DayCellDto {
        day_number: cell.day_number,
        date: cell.date.clone(),
        is_other_month: cell.is_other_month,
        is_today: cell.is_today,
        events: cell.events.iter().map(to_event_dto).collect(),
    }
}

fn to_field_errors(report: &ValidationReport) -> Vec<FieldErrorDto> {
    report
        .errors
        .iter()
        .map(|(field, message)| FieldErrorDto {
            field: field.as_str().to_string(),
            message: message.clone(),
        })
        .collect()
}
