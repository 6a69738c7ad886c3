//! View/controller state for the day-schedule UI.
//!
//! # Responsibility
//! - Track the selected-date cursor and its navigation rules.
//! - Model the create/edit form as an explicit two-variant state machine.
//! - Map mutation outcomes to user-facing notifications.

pub mod cursor;
pub mod form;
pub mod notify;
