use dayplan_core::db::migrations::latest_version;
use dayplan_core::db::open_db_in_memory;
use dayplan_core::{
    EventDraft, EventPatch, EventRepository, RepoError, SqliteEventRepository,
};
use rusqlite::Connection;

fn draft(title: &str, date: &str, start: &str, end: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: None,
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

#[test]
fn insert_assigns_id_and_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let event = repo
        .insert_event(&draft("Standup", "2024-06-10", "09:00", "09:15"))
        .unwrap();

    assert!(!event.id.is_nil());
    assert!(event.created_at > 0);
    assert_eq!(event.title, "Standup");

    let all = repo.all_events().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], event);
}

#[test]
fn insert_normalizes_payload() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let mut payload = draft("  Standup  ", "2024-06-10", "09:00", "09:15");
    payload.description = Some("  ".to_string());
    let event = repo.insert_event(&payload).unwrap();

    assert_eq!(event.title, "Standup");
    assert_eq!(event.description, None);
}

#[test]
fn validation_failure_blocks_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let err = repo
        .insert_event(&draft("Standup", "2024-06-10", "10:00", "09:00"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // No row may exist after a rejected write.
    assert!(repo.all_events().unwrap().is_empty());
}

#[test]
fn update_merges_patch_and_preserves_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let mut payload = draft("Standup", "2024-06-10", "09:00", "09:15");
    payload.description = Some("Daily sync".to_string());
    let created = repo.insert_event(&payload).unwrap();

    let patch = EventPatch {
        title: Some("Retro".to_string()),
        ..EventPatch::default()
    };
    let updated = repo.update_event(created.id, &patch).unwrap();

    assert_eq!(updated.title, "Retro");
    assert_eq!(updated.description.as_deref(), Some("Daily sync"));
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.start_time, created.start_time);
    assert_eq!(updated.created_at, created.created_at);

    let stored = &repo.all_events().unwrap()[0];
    assert_eq!(stored, &updated);
}

#[test]
fn update_clears_description_with_nested_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let mut payload = draft("Standup", "2024-06-10", "09:00", "09:15");
    payload.description = Some("Daily sync".to_string());
    let created = repo.insert_event(&payload).unwrap();

    let patch = EventPatch {
        description: Some(None),
        ..EventPatch::default()
    };
    let updated = repo.update_event(created.id, &patch).unwrap();
    assert_eq!(updated.description, None);
}

#[test]
fn update_rejects_invalid_merged_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let created = repo
        .insert_event(&draft("Standup", "2024-06-10", "09:00", "09:15"))
        .unwrap();

    let patch = EventPatch {
        end_time: Some("08:00".to_string()),
        ..EventPatch::default()
    };
    let err = repo.update_event(created.id, &patch).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // Stored record must be untouched after the rejected merge.
    assert_eq!(repo.all_events().unwrap()[0].end_time, "09:15");
}

#[test]
fn update_missing_event_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let id = uuid::Uuid::new_v4();
    let err = repo.update_event(id, &EventPatch::default()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn delete_removes_record_and_second_delete_fails() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let created = repo
        .insert_event(&draft("Standup", "2024-06-10", "09:00", "09:15"))
        .unwrap();

    repo.delete_event(created.id).unwrap();
    assert!(repo.all_events().unwrap().is_empty());

    let delete_err = repo.delete_event(created.id).unwrap_err();
    assert!(matches!(delete_err, RepoError::NotFound(id) if id == created.id));

    let update_err = repo
        .update_event(created.id, &EventPatch::default())
        .unwrap_err();
    assert!(matches!(update_err, RepoError::NotFound(id) if id == created.id));
}

#[test]
fn all_events_returns_stable_store_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let first = repo
        .insert_event(&draft("first", "2024-06-10", "09:00", "10:00"))
        .unwrap();
    let second = repo
        .insert_event(&draft("second", "2024-06-10", "09:00", "10:00"))
        .unwrap();

    // Pin distinct creation timestamps so ordering does not depend on clock
    // resolution during the test run.
    conn.execute(
        "UPDATE events SET created_at = 100 WHERE id = ?1;",
        [first.id.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE events SET created_at = 200 WHERE id = ?1;",
        [second.id.to_string()],
    )
    .unwrap();

    let all = repo.all_events().unwrap();
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].id, second.id);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteEventRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_events_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEventRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("events"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_events_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE events (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            date TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEventRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "events",
            column: "description"
        })
    ));
}
