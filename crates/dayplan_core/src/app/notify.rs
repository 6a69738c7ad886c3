//! Mutation outcome notifications.
//!
//! # Responsibility
//! - Map mutation results to the user-facing success/failure messages.
//!
//! # Invariants
//! - Every error is terminal for the triggering action; messages never
//!   promise a retry.

use crate::repo::event_repo::RepoError;

/// Mutation performed by a form submission or delete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

/// User-visible outcome notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }
}

/// Success message for a completed mutation.
pub fn success_notice(kind: MutationKind) -> Notice {
    let message = match kind {
        MutationKind::Create => "Event created successfully!",
        MutationKind::Update => "Event updated successfully!",
        MutationKind::Delete => "Event deleted successfully!",
    };
    Notice::Success(message.to_string())
}

/// Failure message for a rejected mutation.
///
/// `NotFound` gets a specific message; validation errors are surfaced inline
/// by the form instead, so everything else collapses to a generic failure.
pub fn failure_notice(kind: MutationKind, error: &RepoError) -> Notice {
    let action = match kind {
        MutationKind::Create => "create",
        MutationKind::Update => "update",
        MutationKind::Delete => "delete",
    };
    let message = match error {
        RepoError::NotFound(_) => format!("Could not {action} event: it no longer exists."),
        _ => format!("Could not {action} event: please try again."),
    };
    Notice::Failure(message)
}
