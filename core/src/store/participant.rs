use super::{select_list, EventStore};
use crate::{error::MetricsResult, record::ParticipantRecord, source::PARTICIPANT_FIELDS};
use rusqlite::params;

impl EventStore {
    // ── Participant ───────────────────────────────────────────────

    pub fn insert_participant(&self, p: &ParticipantRecord) -> MetricsResult<()> {
        self.conn.execute(
            "INSERT INTO participant (event_id, attended, name) VALUES (?1, ?2, ?3)",
            params![
                &p.event_id,
                if p.attended { 1i32 } else { 0i32 },
                p.name.as_deref(),
            ],
        )?;
        Ok(())
    }

    pub fn all_participants(&self, fields: &[&str]) -> MetricsResult<Vec<ParticipantRecord>> {
        PARTICIPANT_FIELDS.validate(fields)?;
        let with_name = fields.contains(&"name");
        let sql = format!(
            "SELECT {} FROM participant ORDER BY participant_id ASC",
            select_list(fields)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(ParticipantRecord {
                event_id: row.get("event_id")?,
                attended: row.get::<_, i32>("attended")? != 0,
                name: if with_name { row.get("name")? } else { None },
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
