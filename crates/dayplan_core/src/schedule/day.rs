//! Day selection and the per-day query cache.
//!
//! # Responsibility
//! - Filter the full collection down to one day and order it by start time.
//! - Provide an explicit cache keyed by the `YYYY-MM-DD` day string.
//!
//! # Invariants
//! - Ordering is ascending by `start_time`; ties keep store order.
//! - Cache entries are only dropped by an explicit invalidation call.

use crate::model::event::Event;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Formats a calendar date as the canonical `YYYY-MM-DD` day key.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Retains the events on the given day, ordered ascending by start time.
///
/// # Contract
/// - Matching is string equality on the normalized day key.
/// - The sort is stable, so equal start times keep the store order of the
///   input sequence.
/// - No matches yields an empty vec, not an error.
pub fn select_day(mut events: Vec<Event>, key: &str) -> Vec<Event> {
    events.retain(|event| event.date == key);
    events.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    events
}

/// Explicit per-day read cache.
///
/// Keys are day strings; values are the ordered day results. Writers call
/// [`DayCache::invalidate_all`] directly after a successful mutation, so
/// there is no implicit global registry involved.
#[derive(Debug, Default)]
pub struct DayCache {
    entries: HashMap<String, Vec<Event>>,
}

impl DayCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached day, if any.
    pub fn get(&self, key: &str) -> Option<&[Event]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Stores a freshly fetched day result.
    pub fn put(&mut self, key: impl Into<String>, events: Vec<Event>) {
        self.entries.insert(key.into(), events);
    }

    /// Drops every cached day so subsequent reads re-fetch.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Number of cached days; used by diagnostics and tests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{day_key, select_day};
    use crate::model::event::Event;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn event_on(date: &str, start: &str, title: &str) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: "23:59".to_string(),
            created_at: 0,
        }
    }

    #[test]
    fn day_key_is_zero_padded_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(day_key(date), "2024-06-03");
    }

    #[test]
    fn select_day_filters_and_sorts_by_start_time() {
        let events = vec![
            event_on("2024-06-10", "14:00", "later"),
            event_on("2024-06-11", "08:00", "other day"),
            event_on("2024-06-10", "09:00", "earlier"),
        ];

        let day = select_day(events, "2024-06-10");
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].title, "earlier");
        assert_eq!(day[1].title, "later");
    }

    #[test]
    fn select_day_keeps_store_order_for_equal_start_times() {
        let events = vec![
            event_on("2024-06-10", "09:00", "first"),
            event_on("2024-06-10", "09:00", "second"),
        ];

        let day = select_day(events, "2024-06-10");
        assert_eq!(day[0].title, "first");
        assert_eq!(day[1].title, "second");
    }

    #[test]
    fn select_day_returns_empty_for_no_matches() {
        let events = vec![event_on("2024-06-10", "09:00", "only")];
        assert!(select_day(events, "2024-06-11").is_empty());
    }
}
