use super::EventStore;
use crate::{error::MetricsResult, record::CenterRecord};
use rusqlite::params;

impl EventStore {
    // ── Center ────────────────────────────────────────────────────

    pub fn insert_center(&self, c: &CenterRecord) -> MetricsResult<()> {
        self.conn.execute(
            "INSERT INTO center (center_id, name) VALUES (?1, ?2)",
            params![&c.id, &c.name],
        )?;
        Ok(())
    }

    pub fn all_centers(&self) -> MetricsResult<Vec<CenterRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT center_id, name FROM center ORDER BY name ASC, center_id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(CenterRecord {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
