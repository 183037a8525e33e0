//! Persistence layer for the calendar core.
//!
//! # Responsibility
//! - Define the durable key-value slot contract and its implementations.
//! - Encode/decode the event collection stored in that slot.
//!
//! # Invariants
//! - Slot reads fail soft; slot writes surface errors to the caller.

pub mod event_repo;
pub mod kv_store;
