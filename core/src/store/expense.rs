use super::{select_list, EventStore};
use crate::{error::MetricsResult, record::ExpenseRecord, source::EXPENSE_FIELDS};
use rusqlite::params;

impl EventStore {
    // ── Expense ───────────────────────────────────────────────────

    pub fn insert_expense(&self, x: &ExpenseRecord) -> MetricsResult<()> {
        self.conn.execute(
            "INSERT INTO expense (event_id, cost, description) VALUES (?1, ?2, ?3)",
            params![&x.event_id, x.cost, x.description.as_deref()],
        )?;
        Ok(())
    }

    pub fn all_expenses(&self, fields: &[&str]) -> MetricsResult<Vec<ExpenseRecord>> {
        EXPENSE_FIELDS.validate(fields)?;
        let with_description = fields.contains(&"description");
        let sql = format!(
            "SELECT {} FROM expense ORDER BY expense_id ASC",
            select_list(fields)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(ExpenseRecord {
                event_id: row.get("event_id")?,
                cost: row.get("cost")?,
                description: if with_description {
                    row.get("description")?
                } else {
                    None
                },
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
