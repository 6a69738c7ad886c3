//! Create/edit form state machine.
//!
//! # Responsibility
//! - Hold the editable field values and the explicit form mode.
//! - Turn a submission into a validated store payload.
//!
//! # Invariants
//! - Opening the form always resets field values: blank defaults in create
//!   mode, the event snapshot in edit mode.
//! - A failed validation returns the field errors and produces no payload,
//!   so no store call can happen for that submission.

use crate::model::event::{
    Event, EventDraft, EventId, EventPatch, ValidationError, DEFAULT_END_TIME, DEFAULT_START_TIME,
};

/// Explicit form mode: either a fresh event or an edit of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Event),
}

/// Validated submission produced by [`EventForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    /// Insert payload for a new event.
    Create(EventDraft),
    /// Full-record update payload for the edited event.
    Update(EventId, EventPatch),
}

/// Editable form state for the create/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventForm {
    mode: FormMode,
    pub title: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl EventForm {
    /// Opens the form in create mode with blank defaults for the given day.
    pub fn open_create(day: impl Into<String>) -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            date: day.into(),
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
        }
    }

    /// Opens the form in edit mode, pre-populated from the event snapshot.
    pub fn open_edit(event: Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            date: event.date.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            mode: FormMode::Edit(event),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Validates the current field values and produces the store payload.
    ///
    /// # Contract
    /// - Create mode yields a normalized [`EventDraft`].
    /// - Edit mode yields a full-record [`EventPatch`]; a blanked description
    ///   clears the stored one.
    /// - On failure, all field errors are returned and nothing is produced.
    pub fn submit(&self) -> Result<FormSubmission, Vec<ValidationError>> {
        let draft = EventDraft {
            title: self.title.clone(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        };
        let normalized = draft.validated()?;

        match &self.mode {
            FormMode::Create => Ok(FormSubmission::Create(normalized)),
            FormMode::Edit(event) => {
                let patch = EventPatch {
                    title: Some(normalized.title),
                    description: Some(normalized.description),
                    date: Some(normalized.date),
                    start_time: Some(normalized.start_time),
                    end_time: Some(normalized.end_time),
                };
                Ok(FormSubmission::Update(event.id, patch))
            }
        }
    }
}
