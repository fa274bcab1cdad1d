use super::{select_list, EventStore};
use crate::{error::MetricsResult, record::SurveyRecord, source::SURVEY_FIELDS};
use rusqlite::params;

impl EventStore {
    // ── Survey ────────────────────────────────────────────────────

    pub fn insert_survey(&self, s: &SurveyRecord) -> MetricsResult<()> {
        self.conn.execute(
            "INSERT INTO survey (event_id, overall_score, recommends, comment)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &s.event_id,
                s.overall_score.map(i64::from),
                s.recommends.map(|r| if r { 1i32 } else { 0i32 }),
                s.comment.as_deref(),
            ],
        )?;
        Ok(())
    }

    pub fn all_surveys(&self, fields: &[&str]) -> MetricsResult<Vec<SurveyRecord>> {
        SURVEY_FIELDS.validate(fields)?;
        let with_comment = fields.contains(&"comment");
        let sql = format!(
            "SELECT {} FROM survey ORDER BY survey_id ASC",
            select_list(fields)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(SurveyRecord {
                event_id: row.get("event_id")?,
                // Out-of-range scores are treated as unanswered.
                overall_score: row
                    .get::<_, Option<i64>>("overall_score")?
                    .and_then(|v| u8::try_from(v).ok())
                    .filter(|v| (1..=5).contains(v)),
                recommends: row.get::<_, Option<i32>>("recommends")?.map(|v| v != 0),
                comment: if with_comment { row.get("comment")? } else { None },
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
