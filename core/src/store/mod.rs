//! SQLite persistence layer for the source records.
//!
//! RULE: only the store talks to the database. The engine consumes it
//! through the `DataSource` trait and never executes SQL directly.

use crate::{
    error::MetricsResult,
    record::{CenterRecord, EventRecord, ExpenseRecord, ParticipantRecord, SurveyRecord},
    source::DataSource,
};
use rusqlite::Connection;

mod center;
mod event;
mod expense;
mod participant;
mod survey;

pub struct EventStore {
    conn: Connection,
}

impl EventStore {
    pub fn open(path: &str) -> MetricsResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        log::debug!("store opened: {path}");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> MetricsResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> MetricsResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_events.sql"))?;
        Ok(())
    }
}

impl DataSource for EventStore {
    fn events(&self) -> MetricsResult<Vec<EventRecord>> {
        self.all_events()
    }

    fn expenses(&self, fields: &[&str]) -> MetricsResult<Vec<ExpenseRecord>> {
        self.all_expenses(fields)
    }

    fn participants(&self, fields: &[&str]) -> MetricsResult<Vec<ParticipantRecord>> {
        self.all_participants(fields)
    }

    fn surveys(&self, fields: &[&str]) -> MetricsResult<Vec<SurveyRecord>> {
        self.all_surveys(fields)
    }

    fn centers(&self) -> MetricsResult<Vec<CenterRecord>> {
        self.all_centers()
    }
}

/// `SELECT a, b, c` for an already-validated projection.
fn select_list(fields: &[&str]) -> String {
    fields.join(", ")
}
