//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the event-store data access contract.
//! - Isolate SQLite query details from service/controller orchestration.
//!
//! # Invariants
//! - Repository writes must validate payloads before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod event_repo;
