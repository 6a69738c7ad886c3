//! Event repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the event-store capability: insert/update/delete/get-all.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate payloads before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `created_at` is assigned at insert and never rewritten.
//! - `all_events` returns stable store order (`created_at ASC, id ASC`).

use crate::db::DbError;
use crate::model::event::{Event, EventDraft, EventId, EventPatch, ValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    date,
    start_time,
    end_time,
    created_at
FROM events";

const EVENTS_TABLE: &str = "events";
const REQUIRED_EVENT_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "date",
    "start_time",
    "end_time",
    "created_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for event persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Payload failed domain validation; no SQL was executed.
    Validation(Vec<ValidationError>),
    Db(DbError),
    NotFound(EventId),
    InvalidData(String),
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => {
                let joined = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "invalid event payload: {joined}")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "event not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Vec<ValidationError>> for RepoError {
    fn from(value: Vec<ValidationError>) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Event-store capability: the only persistence boundary of the application.
pub trait EventRepository {
    /// Persists a new event, assigning `id` and `created_at`.
    fn insert_event(&self, draft: &EventDraft) -> RepoResult<Event>;
    /// Merges a partial payload into an existing record.
    fn update_event(&self, id: EventId, patch: &EventPatch) -> RepoResult<Event>;
    /// Removes a record permanently.
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
    /// Returns every stored event in stable store order.
    fn all_events(&self) -> RepoResult<Vec<Event>>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Wraps a connection after checking it carries the expected schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration known by this binary.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the events
    ///   table shape is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = crate::db::migrations::latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        if !table_exists(conn, EVENTS_TABLE)? {
            return Err(RepoError::MissingRequiredTable(EVENTS_TABLE));
        }

        let columns = table_columns(conn, EVENTS_TABLE)?;
        for required in REQUIRED_EVENT_COLUMNS {
            if !columns.iter().any(|column| column == required) {
                return Err(RepoError::MissingRequiredColumn {
                    table: EVENTS_TABLE,
                    column: required,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn insert_event(&self, draft: &EventDraft) -> RepoResult<Event> {
        let normalized = draft.validated()?;

        let event = Event {
            id: Uuid::new_v4(),
            title: normalized.title,
            description: normalized.description,
            date: normalized.date,
            start_time: normalized.start_time,
            end_time: normalized.end_time,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        self.conn.execute(
            "INSERT INTO events (
                id,
                title,
                description,
                date,
                start_time,
                end_time,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                event.id.to_string(),
                event.title.as_str(),
                event.description.as_deref(),
                event.date.as_str(),
                event.start_time.as_str(),
                event.end_time.as_str(),
                event.created_at,
            ],
        )?;

        Ok(event)
    }

    fn update_event(&self, id: EventId, patch: &EventPatch) -> RepoResult<Event> {
        let mut event = self.get_event(id)?.ok_or(RepoError::NotFound(id))?;

        patch.apply_to(&mut event);
        event.validate()?;

        let changed = self.conn.execute(
            "UPDATE events
             SET
                title = ?1,
                description = ?2,
                date = ?3,
                start_time = ?4,
                end_time = ?5
             WHERE id = ?6;",
            params![
                event.title.as_str(),
                event.description.as_deref(),
                event.date.as_str(),
                event.start_time.as_str(),
                event.end_time.as_str(),
                event.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(event)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn all_events(&self) -> RepoResult<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} ORDER BY created_at ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }
}

impl SqliteEventRepository<'_> {
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }

        Ok(None)
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in events.id"))
    })?;

    let event = Event {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        date: row.get("date")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        created_at: row.get("created_at")?,
    };
    event.validate().map_err(|errors| {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        RepoError::InvalidData(format!("event {id} failed validation: {joined}"))
    })?;
    Ok(event)
}

fn table_exists(conn: &Connection, table_name: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table_name: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table_name});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();

    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>("name")?);
    }

    Ok(columns)
}
