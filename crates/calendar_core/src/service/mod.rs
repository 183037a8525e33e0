//! Core use-case services.
//!
//! # Responsibility
//! - Own the authoritative in-memory event collection.
//! - Keep UI/FFI layers decoupled from slot encoding and storage details.

pub mod event_store;
