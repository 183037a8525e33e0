//! Calendar domain model.
//!
//! # Responsibility
//! - Define the persisted `Event` record and the raw `EventInput` form shape.
//! - Own the normalization rules shared by create and update paths.
//!
//! # Invariants
//! - Every event is identified by an `EventId` that is never reused.
//! - `id` and `created_at` are assigned once and never mutated.

pub mod event;
