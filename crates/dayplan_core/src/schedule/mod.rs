//! Day-scoped query logic and its read cache.
//!
//! # Responsibility
//! - Select and order the events belonging to one calendar day.
//! - Cache per-day results until a mutation invalidates them.

pub mod day;
