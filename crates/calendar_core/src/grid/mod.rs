//! Month grid generation.
//!
//! # Responsibility
//! - Model a displayed month (`MonthRef`) and its navigation.
//! - Expand a month into whole weeks of `DayCell`s annotated with events.
//!
//! # Invariants
//! - Months are 1-indexed (January = 1).
//! - Weeks start on Sunday (first grid column is Sunday).
//! - Grid building is pure and deterministic for the same inputs.

mod builder;
mod month;

pub use builder::{build_month_grid, default_event_date, DayCell, EventLookup};
pub use month::{GridError, MonthRef, MAX_YEAR, MAX_YEAR_LAST_MONTH, MIN_YEAR};
