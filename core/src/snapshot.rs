//! Snapshot: the complete set of raw records for one aggregation run.
//!
//! A snapshot is fetched once per report and consumed whole. It also
//! serializes to JSON, so a captured snapshot can be replayed through the
//! engine as a `DataSource`.

use crate::{
    error::MetricsResult,
    record::{CenterRecord, EventRecord, ExpenseRecord, ParticipantRecord, SurveyRecord},
    source::{CenterScope, DataSource, EXPENSE_FIELDS, PARTICIPANT_FIELDS, SURVEY_FIELDS},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub participants: Vec<ParticipantRecord>,
    #[serde(default)]
    pub surveys: Vec<SurveyRecord>,
    #[serde(default)]
    pub centers: Vec<CenterRecord>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> MetricsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> MetricsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restrict to the events `scope` can see.
    ///
    /// Related rows of hidden events go with them. Rows whose event id
    /// matches no event at all are kept, so the extractor still counts
    /// them as orphans.
    pub fn scoped(self, scope: &CenterScope) -> Self {
        if *scope == CenterScope::All {
            return self;
        }

        let all_ids: HashSet<String> = self.events.iter().map(|e| e.id.clone()).collect();
        let events: Vec<EventRecord> = self
            .events
            .into_iter()
            .filter(|e| scope.includes(e.center_id.as_deref()))
            .collect();
        let visible: HashSet<&str> = events.iter().map(|e| e.id.as_str()).collect();
        let keep = |event_id: &str| visible.contains(event_id) || !all_ids.contains(event_id);

        let expenses = self
            .expenses
            .into_iter()
            .filter(|r| keep(&r.event_id))
            .collect();
        let participants = self
            .participants
            .into_iter()
            .filter(|r| keep(&r.event_id))
            .collect();
        let surveys = self
            .surveys
            .into_iter()
            .filter(|r| keep(&r.event_id))
            .collect();
        let centers = self
            .centers
            .into_iter()
            .filter(|c| scope.includes(Some(c.id.as_str())))
            .collect();

        Snapshot {
            events,
            expenses,
            participants,
            surveys,
            centers,
        }
    }
}

impl DataSource for Snapshot {
    fn events(&self) -> MetricsResult<Vec<EventRecord>> {
        Ok(self.events.clone())
    }

    fn expenses(&self, fields: &[&str]) -> MetricsResult<Vec<ExpenseRecord>> {
        EXPENSE_FIELDS.validate(fields)?;
        let with_description = fields.contains(&"description");
        Ok(self
            .expenses
            .iter()
            .map(|r| ExpenseRecord {
                description: r.description.clone().filter(|_| with_description),
                ..r.clone()
            })
            .collect())
    }

    fn participants(&self, fields: &[&str]) -> MetricsResult<Vec<ParticipantRecord>> {
        PARTICIPANT_FIELDS.validate(fields)?;
        let with_name = fields.contains(&"name");
        Ok(self
            .participants
            .iter()
            .map(|r| ParticipantRecord {
                name: r.name.clone().filter(|_| with_name),
                ..r.clone()
            })
            .collect())
    }

    fn surveys(&self, fields: &[&str]) -> MetricsResult<Vec<SurveyRecord>> {
        SURVEY_FIELDS.validate(fields)?;
        let with_comment = fields.contains(&"comment");
        Ok(self
            .surveys
            .iter()
            .map(|r| SurveyRecord {
                comment: r.comment.clone().filter(|_| with_comment),
                ..r.clone()
            })
            .collect())
    }

    fn centers(&self) -> MetricsResult<Vec<CenterRecord>> {
        Ok(self.centers.clone())
    }
}
