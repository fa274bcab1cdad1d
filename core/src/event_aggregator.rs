//! Event aggregator: per-event derived metrics.
//!
//! A pure mapping from one event and its related rows to an
//! `EventMetrics`. No state is shared between events.

use crate::{
    extractor::{EventRelations, Extracted},
    record::EventRecord,
    types::{CenterId, EventId, Pct},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventMetrics {
    pub event_id: EventId,
    pub name: String,
    pub status: String,
    pub center_id: Option<CenterId>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub date: NaiveDate,
    pub income: f64,
    pub expense_total: f64,
    /// Always exactly `income - expense_total`.
    pub balance: f64,
    pub participant_count: i64,
    pub attendee_count: i64,
    /// 0 when there are no participants.
    pub attendance_rate_pct: Pct,
    pub survey_count: i64,
    /// Surveys that carried a score.
    pub scored_survey_count: i64,
    /// 0 when no survey carried a score. Check `survey_count` before
    /// reading it as satisfaction.
    pub avg_score: f64,
    pub recommend_count: i64,
    /// 0 when there are no surveys.
    pub recommend_pct: Pct,
}

impl EventMetrics {
    pub fn has_surveys(&self) -> bool {
        self.survey_count > 0
    }
}

/// Compute metrics for one event.
pub fn event_metrics(event: &EventRecord, related: &EventRelations<'_>) -> EventMetrics {
    let income = event.income();
    let expense_total: f64 = related.expenses.iter().map(|x| x.cost).sum();

    let participant_count = related.participants.len() as i64;
    let attendee_count = related.participants.iter().filter(|p| p.attended).count() as i64;

    let survey_count = related.surveys.len() as i64;
    let scores: Vec<f64> = related
        .surveys
        .iter()
        .filter_map(|s| s.overall_score)
        .map(f64::from)
        .collect();
    let scored_survey_count = scores.len() as i64;
    let avg_score = round_score(mean(&scores).unwrap_or(0.0));
    let recommend_count = related
        .surveys
        .iter()
        .filter(|s| s.recommends == Some(true))
        .count() as i64;

    EventMetrics {
        event_id: event.id.clone(),
        name: event.name.clone(),
        status: event.status.clone(),
        center_id: event.center_id.clone(),
        event_type: event.event_type.clone(),
        date: event.date,
        income,
        expense_total,
        balance: income - expense_total,
        participant_count,
        attendee_count,
        attendance_rate_pct: pct(attendee_count, participant_count),
        survey_count,
        scored_survey_count,
        avg_score,
        recommend_count,
        recommend_pct: pct(recommend_count, survey_count),
    }
}

/// Metrics for every extracted event, in snapshot order.
pub fn aggregate_events(extracted: &Extracted<'_>) -> Vec<EventMetrics> {
    extracted
        .events
        .iter()
        .map(|(event, related)| event_metrics(event, related))
        .collect()
}

/// `round(100 × part / whole)`, 0 for an empty whole.
pub fn pct(part: i64, whole: i64) -> Pct {
    if whole <= 0 {
        return 0.0;
    }
    (100.0 * part as f64 / whole as f64).round().clamp(0.0, 100.0)
}

/// Scores are reported with one decimal.
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_guards_zero_denominator() {
        assert_eq!(pct(0, 0), 0.0);
        assert_eq!(pct(3, 0), 0.0);
    }

    #[test]
    fn pct_rounds_to_whole_number() {
        assert_eq!(pct(1, 3), 33.0);
        assert_eq!(pct(2, 3), 67.0);
        assert_eq!(pct(1, 8), 13.0); // 12.5 rounds up
    }

    #[test]
    fn scores_round_to_one_decimal() {
        assert_eq!(round_score(4.0), 4.0);
        assert_eq!(round_score(11.0 / 3.0), 3.7);
        assert_eq!(round_score(4.25), 4.3);
    }
}
