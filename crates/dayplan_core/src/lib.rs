//! Core domain logic for the day-schedule application.
//! This crate is the single source of truth for business invariants.

pub mod app;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use app::cursor::DateCursor;
pub use app::form::{EventForm, FormMode, FormSubmission};
pub use app::notify::{failure_notice, success_notice, MutationKind, Notice};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventDraft, EventId, EventPatch, Field, ValidationError};
pub use repo::event_repo::{EventRepository, RepoError, RepoResult, SqliteEventRepository};
pub use schedule::day::{day_key, select_day, DayCache};
pub use service::event_service::EventService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
