//! Data-source seam and the snapshot fetch barrier.
//!
//! RULE: aggregation never starts from a partial snapshot. `fetch_snapshot`
//! performs every fetch first; if any one fails the whole call fails and
//! nothing fetched so far is returned.

use crate::{
    error::{MetricsError, MetricsResult},
    record::{CenterRecord, EventRecord, ExpenseRecord, ParticipantRecord, SurveyRecord},
    snapshot::Snapshot,
    types::CenterId,
};
use serde::{Deserialize, Serialize};

/// Columns a source exposes for one related entity.
#[derive(Debug, Clone, Copy)]
pub struct FieldSet {
    pub entity: &'static str,
    /// Must always be projected.
    pub required: &'static [&'static str],
    /// May be projected on request.
    pub optional: &'static [&'static str],
}

impl FieldSet {
    /// Reject unknown columns and projections missing a required column.
    pub fn validate(&self, fields: &[&str]) -> MetricsResult<()> {
        for field in fields {
            if !self.required.contains(field) && !self.optional.contains(field) {
                return Err(MetricsError::InvalidField {
                    entity: self.entity,
                    field: field.to_string(),
                });
            }
        }
        for required in self.required {
            if !fields.contains(required) {
                return Err(MetricsError::InvalidField {
                    entity: self.entity,
                    field: format!("{required} (required)"),
                });
            }
        }
        Ok(())
    }

    /// The minimum projection the engine needs.
    pub fn minimum(&self) -> &'static [&'static str] {
        self.required
    }
}

pub const EXPENSE_FIELDS: FieldSet = FieldSet {
    entity: "expenses",
    required: &["event_id", "cost"],
    optional: &["description"],
};

pub const PARTICIPANT_FIELDS: FieldSet = FieldSet {
    entity: "participants",
    required: &["event_id", "attended"],
    optional: &["name"],
};

pub const SURVEY_FIELDS: FieldSet = FieldSet {
    entity: "surveys",
    required: &["event_id", "overall_score", "recommends"],
    optional: &["comment"],
};

/// The read-only contract the engine consumes.
///
/// Implementors must not have side effects. Every method is one fetch;
/// `fetch_snapshot` is the only caller inside the crate.
pub trait DataSource {
    fn events(&self) -> MetricsResult<Vec<EventRecord>>;

    fn expenses(&self, fields: &[&str]) -> MetricsResult<Vec<ExpenseRecord>>;

    fn participants(&self, fields: &[&str]) -> MetricsResult<Vec<ParticipantRecord>>;

    fn surveys(&self, fields: &[&str]) -> MetricsResult<Vec<SurveyRecord>>;

    fn centers(&self) -> MetricsResult<Vec<CenterRecord>>;
}

/// Which centers a view may see. Passed explicitly, never read from
/// session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "centers", rename_all = "snake_case")]
pub enum CenterScope {
    #[default]
    All,
    Centers(Vec<CenterId>),
}

impl CenterScope {
    /// Events without a center are only visible to an unrestricted scope.
    pub fn includes(&self, center_id: Option<&str>) -> bool {
        match self {
            CenterScope::All => true,
            CenterScope::Centers(ids) => {
                center_id.is_some_and(|id| ids.iter().any(|c| c == id))
            }
        }
    }
}

/// Fetch a complete snapshot from `source`, then apply `scope`.
pub fn fetch_snapshot<S>(source: &S, scope: &CenterScope) -> MetricsResult<Snapshot>
where
    S: DataSource + ?Sized,
{
    let events = source.events().map_err(|e| as_fetch_error("events", e))?;
    let expenses = source
        .expenses(EXPENSE_FIELDS.minimum())
        .map_err(|e| as_fetch_error("expenses", e))?;
    let participants = source
        .participants(PARTICIPANT_FIELDS.minimum())
        .map_err(|e| as_fetch_error("participants", e))?;
    let surveys = source
        .surveys(SURVEY_FIELDS.minimum())
        .map_err(|e| as_fetch_error("surveys", e))?;
    let centers = source.centers().map_err(|e| as_fetch_error("centers", e))?;

    log::debug!(
        "snapshot fetched: events={} expenses={} participants={} surveys={} centers={}",
        events.len(),
        expenses.len(),
        participants.len(),
        surveys.len(),
        centers.len(),
    );

    let snapshot = Snapshot {
        events,
        expenses,
        participants,
        surveys,
        centers,
    };
    Ok(snapshot.scoped(scope))
}

fn as_fetch_error(entity: &'static str, err: MetricsError) -> MetricsError {
    match err {
        MetricsError::DataFetch { .. } => err,
        other => MetricsError::fetch(entity, other),
    }
}
