//! Selected-date cursor.
//!
//! # Responsibility
//! - Hold the single day currently displayed to the user.
//! - Advance it by relative steps or absolute jumps.
//!
//! # Invariants
//! - Jump targets (today/tomorrow/next week) are computed from the injected
//!   real current date, never from the cursor position.

use chrono::{Days, NaiveDate};

/// The day currently displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCursor {
    selected: NaiveDate,
}

impl DateCursor {
    pub fn new(selected: NaiveDate) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Steps the cursor one day back.
    pub fn previous_day(&mut self) {
        if let Some(date) = self.selected.pred_opt() {
            self.selected = date;
        }
    }

    /// Steps the cursor one day forward.
    pub fn next_day(&mut self) {
        if let Some(date) = self.selected.succ_opt() {
            self.selected = date;
        }
    }

    /// Jumps to the real current date.
    pub fn jump_today(&mut self, today: NaiveDate) {
        self.selected = today;
    }

    /// Jumps to the day after the real current date.
    pub fn jump_tomorrow(&mut self, today: NaiveDate) {
        if let Some(date) = today.checked_add_days(Days::new(1)) {
            self.selected = date;
        }
    }

    /// Jumps seven days past the real current date.
    pub fn jump_next_week(&mut self, today: NaiveDate) {
        if let Some(date) = today.checked_add_days(Days::new(7)) {
            self.selected = date;
        }
    }

    /// Whether the cursor sits on the real current date.
    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.selected == today
    }
}
