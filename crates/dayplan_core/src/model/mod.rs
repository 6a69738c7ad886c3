//! Domain model for day-schedule events.
//!
//! # Responsibility
//! - Define the canonical event record and its write payloads.
//! - Own field-level validation and payload normalization.
//!
//! # Invariants
//! - Every event is identified by a stable `EventId`.
//! - Deletion is hard delete; there are no tombstones or versions.

pub mod event;
