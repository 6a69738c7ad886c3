//! Event use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete entry points that keep reads consistent.
//! - Serve day queries from the explicit per-day cache.
//!
//! # Invariants
//! - Every successful mutation invalidates the whole day cache before
//!   returning, so subsequent reads re-fetch (invalidate-then-refetch).
//! - Mutations never apply optimistic local patches to cached results.
//! - Service APIs never bypass repository validation contracts.

use crate::model::event::{Event, EventDraft, EventId, EventPatch};
use crate::repo::event_repo::{EventRepository, RepoResult};
use crate::schedule::day::{day_key, select_day, DayCache};
use chrono::NaiveDate;
use log::{error, info};

/// Use-case facade owning the repository and the day cache.
pub struct EventService<R: EventRepository> {
    repo: R,
    cache: DayCache,
}

impl<R: EventRepository> EventService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            cache: DayCache::new(),
        }
    }

    /// Creates a new event and invalidates cached day results.
    pub fn create_event(&mut self, draft: &EventDraft) -> RepoResult<Event> {
        match self.repo.insert_event(draft) {
            Ok(event) => {
                self.cache.invalidate_all();
                info!(
                    "event=event_create module=service status=ok id={} date={}",
                    event.id, event.date
                );
                Ok(event)
            }
            Err(err) => {
                error!("event=event_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Merges a partial payload into an existing event.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_event(&mut self, id: EventId, patch: &EventPatch) -> RepoResult<Event> {
        match self.repo.update_event(id, patch) {
            Ok(event) => {
                self.cache.invalidate_all();
                info!(
                    "event=event_update module=service status=ok id={} date={}",
                    event.id, event.date
                );
                Ok(event)
            }
            Err(err) => {
                error!("event=event_update module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    /// Deletes an event permanently.
    pub fn delete_event(&mut self, id: EventId) -> RepoResult<()> {
        match self.repo.delete_event(id) {
            Ok(()) => {
                self.cache.invalidate_all();
                info!("event=event_delete module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                error!("event=event_delete module=service status=error id={id} error={err}");
                Err(err)
            }
        }
    }

    /// Returns the ordered events for one calendar day.
    ///
    /// Serves from the day cache when the key is present; otherwise fetches
    /// the full collection, selects the day and fills the cache. Switching
    /// dates simply starts an independent keyed fetch.
    pub fn events_on(&mut self, date: NaiveDate) -> RepoResult<Vec<Event>> {
        let key = day_key(date);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.to_vec());
        }

        let day = select_day(self.repo.all_events()?, &key);
        self.cache.put(key, day.clone());
        Ok(day)
    }

    /// Number of cached day keys; exposed for diagnostics and tests.
    pub fn cached_days(&self) -> usize {
        self.cache.len()
    }
}
