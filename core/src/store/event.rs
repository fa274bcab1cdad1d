use super::EventStore;
use crate::{
    error::{MetricsError, MetricsResult},
    record::EventRecord,
};
use chrono::NaiveDate;
use rusqlite::params;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An event row before its stored date is parsed.
struct EventRow {
    id: String,
    name: String,
    raw_date: String,
    status: String,
    event_type: String,
    center_id: Option<String>,
    capacity_max: i64,
    capacity_actual: i64,
    ticket_price: Option<f64>,
}

impl EventRow {
    fn into_record(self) -> MetricsResult<EventRecord> {
        let date = NaiveDate::parse_from_str(&self.raw_date, DATE_FORMAT)
            .map_err(|_| MetricsError::InvalidDate { value: self.raw_date.clone() })?;
        Ok(EventRecord {
            id: self.id,
            name: self.name,
            date,
            status: self.status,
            event_type: self.event_type,
            center_id: self.center_id,
            capacity_max: self.capacity_max,
            capacity_actual: self.capacity_actual,
            ticket_price: self.ticket_price,
        })
    }
}

// Helper function for mapping event rows
fn event_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        name: row.get(1)?,
        raw_date: row.get(2)?,
        status: row.get(3)?,
        event_type: row.get(4)?,
        center_id: row.get(5)?,
        capacity_max: row.get(6)?,
        capacity_actual: row.get(7)?,
        ticket_price: row.get(8)?,
    })
}

impl EventStore {
    // ── Event ─────────────────────────────────────────────────────

    pub fn insert_event(&self, e: &EventRecord) -> MetricsResult<()> {
        self.conn.execute(
            "INSERT INTO event (
                event_id, name, event_date, status, event_type, center_id,
                capacity_max, capacity_actual, ticket_price
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &e.id,
                &e.name,
                e.date.format(DATE_FORMAT).to_string(),
                &e.status,
                &e.event_type,
                e.center_id.as_deref(),
                e.capacity_max,
                e.capacity_actual,
                e.ticket_price,
            ],
        )?;
        Ok(())
    }

    /// All events, oldest first. Ties keep insertion order.
    pub fn all_events(&self) -> MetricsResult<Vec<EventRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT event_id, name, event_date, status, event_type, center_id,
                    capacity_max, capacity_actual, ticket_price
             FROM event ORDER BY event_date ASC, rowid ASC",
        )?;
        let rows = stmt.query_map([], event_row_mapper)?;
        rows.map(|row| row?.into_record()).collect()
    }

    pub fn event_count(&self) -> MetricsResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM event", [], |row| row.get(0))?;
        Ok(count)
    }
}
