use chrono::NaiveDate;
use dayplan_core::{
    Event, EventDraft, EventPatch, EventRepository, EventService, RepoError, RepoResult,
};
use std::cell::{Cell, RefCell};
use uuid::Uuid;

/// In-memory repository that counts full-collection fetches, so tests can
/// observe whether a read was served from the day cache.
#[derive(Default)]
struct CountingRepo {
    events: RefCell<Vec<Event>>,
    fetches: Cell<usize>,
}

impl CountingRepo {
    fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl EventRepository for &CountingRepo {
    fn insert_event(&self, draft: &EventDraft) -> RepoResult<Event> {
        let normalized = draft.validated()?;
        let mut events = self.events.borrow_mut();
        let event = Event {
            id: Uuid::new_v4(),
            title: normalized.title,
            description: normalized.description,
            date: normalized.date,
            start_time: normalized.start_time,
            end_time: normalized.end_time,
            created_at: events.len() as i64 + 1,
        };
        events.push(event.clone());
        Ok(event)
    }

    fn update_event(&self, id: Uuid, patch: &EventPatch) -> RepoResult<Event> {
        let mut events = self.events.borrow_mut();
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(RepoError::NotFound(id))?;
        patch.apply_to(event);
        event.validate()?;
        Ok(event.clone())
    }

    fn delete_event(&self, id: Uuid) -> RepoResult<()> {
        let mut events = self.events.borrow_mut();
        let before = events.len();
        events.retain(|event| event.id != id);
        if events.len() == before {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn all_events(&self) -> RepoResult<Vec<Event>> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self.events.borrow().clone())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft_on(date: &str) -> EventDraft {
    EventDraft {
        title: "cached".to_string(),
        description: None,
        date: date.to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
    }
}

#[test]
fn repeated_reads_of_one_day_hit_the_cache() {
    let repo = CountingRepo::default();
    let mut service = EventService::new(&repo);

    service.events_on(date(2024, 6, 10)).unwrap();
    service.events_on(date(2024, 6, 10)).unwrap();

    assert_eq!(repo.fetch_count(), 1);
    assert_eq!(service.cached_days(), 1);
}

#[test]
fn each_day_is_an_independent_cache_key() {
    let repo = CountingRepo::default();
    let mut service = EventService::new(&repo);

    service.events_on(date(2024, 6, 10)).unwrap();
    service.events_on(date(2024, 6, 11)).unwrap();
    service.events_on(date(2024, 6, 10)).unwrap();

    assert_eq!(repo.fetch_count(), 2);
    assert_eq!(service.cached_days(), 2);
}

#[test]
fn successful_create_invalidates_and_next_read_refetches() {
    let repo = CountingRepo::default();
    let mut service = EventService::new(&repo);

    assert!(service.events_on(date(2024, 6, 10)).unwrap().is_empty());
    assert_eq!(repo.fetch_count(), 1);

    service.create_event(&draft_on("2024-06-10")).unwrap();
    assert_eq!(service.cached_days(), 0);

    let day = service.events_on(date(2024, 6, 10)).unwrap();
    assert_eq!(repo.fetch_count(), 2);
    assert_eq!(day.len(), 1);
}

#[test]
fn successful_update_and_delete_invalidate_the_cache() {
    let repo = CountingRepo::default();
    let mut service = EventService::new(&repo);

    let created = service.create_event(&draft_on("2024-06-10")).unwrap();
    service.events_on(date(2024, 6, 10)).unwrap();
    assert_eq!(service.cached_days(), 1);

    let patch = EventPatch {
        title: Some("renamed".to_string()),
        ..EventPatch::default()
    };
    service.update_event(created.id, &patch).unwrap();
    assert_eq!(service.cached_days(), 0);

    service.events_on(date(2024, 6, 10)).unwrap();
    service.delete_event(created.id).unwrap();
    assert_eq!(service.cached_days(), 0);
}

#[test]
fn failed_mutation_leaves_cached_reads_in_place() {
    let repo = CountingRepo::default();
    let mut service = EventService::new(&repo);

    service.events_on(date(2024, 6, 10)).unwrap();
    let fetches_before = repo.fetch_count();

    let err = service.delete_event(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    service.events_on(date(2024, 6, 10)).unwrap();
    assert_eq!(repo.fetch_count(), fetches_before);
}
