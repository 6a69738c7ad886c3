//! Event domain model and validation.
//!
//! # Responsibility
//! - Define the canonical event record shared by storage and UI layers.
//! - Validate and normalize write payloads before they reach persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - `created_at` is set once at insertion and never mutated.
//! - `start_time < end_time` lexicographically; with zero-padded `HH:MM`
//!   strings that ordering is also chronological.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an event record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EventId = Uuid;

/// Default start time used when the create form opens blank.
pub const DEFAULT_START_TIME: &str = "09:00";
/// Default end time used when the create form opens blank.
pub const DEFAULT_END_TIME: &str = "10:00";

/// Form field a validation error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Date,
    StartTime,
    EndTime,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Date => "date",
            Self::StartTime => "start_time",
            Self::EndTime => "end_time",
        };
        write!(f, "{name}")
    }
}

/// Field-scoped validation failure for an event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// A required field is missing or blank.
    MissingField(Field),
    /// End time does not come after start time.
    EndNotAfterStart { start: String, end: String },
}

impl ValidationError {
    /// Returns the form field this error should be surfaced next to.
    pub fn field(&self) -> Field {
        match self {
            Self::EmptyTitle => Field::Title,
            Self::MissingField(field) => *field,
            Self::EndNotAfterStart { .. } => Field::EndTime,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::EndNotAfterStart { start, end } => {
                write!(f, "end time ({end}) must be after start time ({start})")
            }
        }
    }
}

impl Error for ValidationError {}

/// Canonical stored event record.
///
/// Serialized field names match the external `camelCase` schema used by the
/// original collection format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable global ID assigned by the store at insertion.
    pub id: EventId,
    /// Non-empty display title.
    pub title: String,
    /// Optional free-form details.
    pub description: Option<String>,
    /// ISO-8601 calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Local time of day, zero-padded 24-hour `HH:MM`.
    pub start_time: String,
    /// Local time of day, must be after `start_time`.
    pub end_time: String,
    /// Unix epoch milliseconds, set once at insertion.
    pub created_at: i64,
}

impl Event {
    /// Validates the stored record against domain rules.
    ///
    /// Used by read paths to reject invalid persisted state instead of
    /// masking it, and by write paths after patch merging.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors = collect_field_errors(
            &self.title,
            &self.date,
            &self.start_time,
            &self.end_time,
        );
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Insert payload for a new event.
///
/// Lacks `id` and `created_at`; both are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl EventDraft {
    /// Creates a blank draft for the given day using form defaults.
    pub fn for_day(date: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            description: None,
            date: date.into(),
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
        }
    }

    /// Validates the draft and returns a normalized copy.
    ///
    /// # Contract
    /// - Pure function of the input; no side effects.
    /// - All applicable field errors are collected, not just the first.
    /// - Normalization trims `title`/`description` and maps an empty
    ///   description to `None`.
    pub fn validated(&self) -> Result<EventDraft, Vec<ValidationError>> {
        let errors = collect_field_errors(
            &self.title,
            &self.date,
            &self.start_time,
            &self.end_time,
        );
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(EventDraft {
            title: self.title.trim().to_string(),
            description: normalize_description(self.description.as_deref()),
            date: self.date.trim().to_string(),
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
        })
    }
}

/// Partial update payload for an existing event.
///
/// `None` fields are left untouched. `description` uses a nested `Option`
/// so callers can distinguish "leave as is" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl EventPatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }

    /// Merges this patch into an existing record.
    ///
    /// # Invariants
    /// - `id` and `created_at` are never touched.
    /// - The merged record still requires [`Event::validate`] before
    ///   persistence.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            event.description = normalize_description(description.as_deref());
        }
        if let Some(date) = &self.date {
            event.date = date.trim().to_string();
        }
        if let Some(start_time) = &self.start_time {
            event.start_time = start_time.trim().to_string();
        }
        if let Some(end_time) = &self.end_time {
            event.end_time = end_time.trim().to_string();
        }
    }
}

fn normalize_description(value: Option<&str>) -> Option<String> {
    match value {
        Some(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}

fn collect_field_errors(
    title: &str,
    date: &str,
    start_time: &str,
    end_time: &str,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if title.trim().is_empty() {
        errors.push(ValidationError::EmptyTitle);
    }
    if date.trim().is_empty() {
        errors.push(ValidationError::MissingField(Field::Date));
    }

    let start = start_time.trim();
    let end = end_time.trim();
    if start.is_empty() {
        errors.push(ValidationError::MissingField(Field::StartTime));
    }
    if end.is_empty() {
        errors.push(ValidationError::MissingField(Field::EndTime));
    }

    // Cross-field check only makes sense once both times are present.
    if !start.is_empty() && !end.is_empty() && end <= start {
        errors.push(ValidationError::EndNotAfterStart {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    errors
}
