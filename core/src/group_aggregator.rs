//! Group aggregator: rolls per-event metrics into buckets.
//!
//! Sums are plain sums. Ratios are recomputed from the summed counts,
//! never averaged from per-event ratios. The satisfaction average only
//! counts events that received at least one survey.

use crate::{
    config::ReportConfig,
    event_aggregator::{mean, pct, round_score, EventMetrics},
    record::CenterRecord,
    types::{CenterId, Pct},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GroupKey {
    /// Single bucket holding every event.
    All,
    /// `None` collects events without a center.
    Center(Option<CenterId>),
    EventType(String),
    Month { year: i32, month: u32 },
}

impl GroupKey {
    pub fn month_of(date: NaiveDate) -> Self {
        GroupKey::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the bucket, for month keys only.
    pub fn month_start(&self) -> Option<NaiveDate> {
        match self {
            GroupKey::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            _ => None,
        }
    }
}

pub fn by_center(m: &EventMetrics) -> GroupKey {
    GroupKey::Center(m.center_id.clone())
}

pub fn by_type(m: &EventMetrics) -> GroupKey {
    GroupKey::EventType(m.event_type.clone())
}

pub fn by_month(m: &EventMetrics) -> GroupKey {
    GroupKey::month_of(m.date)
}

/// The grouping dimensions the reports offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    Center,
    EventType,
    Month,
}

impl Grouping {
    pub fn key_fn(self) -> fn(&EventMetrics) -> GroupKey {
        match self {
            Grouping::Center    => by_center,
            Grouping::EventType => by_type,
            Grouping::Month     => by_month,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupMetrics {
    pub group_key: GroupKey,
    pub label: String,
    pub event_count: i64,
    pub income: f64,
    pub expense_total: f64,
    pub balance: f64,
    pub participant_count: i64,
    pub attendee_count: i64,
    /// `attendee_count / participant_count`, from the sums.
    pub attendance_rate_pct: Pct,
    pub survey_count: i64,
    pub recommend_count: i64,
    /// `recommend_count / survey_count`, from the sums.
    pub recommend_pct: Pct,
    /// Events with at least one survey; these alone feed `avg_score`.
    pub surveyed_event_count: i64,
    /// Mean of per-event scores over surveyed events; 0 when none.
    pub avg_score: f64,
}

impl GroupMetrics {
    pub fn has_surveys(&self) -> bool {
        self.surveyed_event_count > 0
    }
}

/// Turns group keys into display labels.
#[derive(Debug, Clone)]
pub struct GroupLabeler {
    center_names: HashMap<CenterId, String>,
    unassigned_label: String,
    month_format: String,
}

impl GroupLabeler {
    pub fn new(centers: &[CenterRecord], config: &ReportConfig) -> Self {
        Self {
            center_names: centers
                .iter()
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect(),
            unassigned_label: config.unassigned_center_label.clone(),
            month_format: config.month_label_format.clone(),
        }
    }

    pub fn label(&self, key: &GroupKey) -> String {
        match key {
            GroupKey::All => "Total".into(),
            // Unknown center ids fall back to the raw id.
            GroupKey::Center(Some(id)) => self
                .center_names
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.clone()),
            GroupKey::Center(None) => self.unassigned_label.clone(),
            GroupKey::EventType(t) => t.clone(),
            GroupKey::Month { year, month } => self.month_label(*year, *month),
        }
    }

    pub fn center_name(&self, center_id: Option<&str>) -> String {
        match center_id {
            Some(id) => self
                .center_names
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string()),
            None => self.unassigned_label.clone(),
        }
    }

    pub fn month_label(&self, year: i32, month: u32) -> String {
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(d) => d.format(&self.month_format).to_string(),
            None => format!("{year}-{month:02}"),
        }
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    event_count: i64,
    income: f64,
    expense_total: f64,
    balance: f64,
    participant_count: i64,
    attendee_count: i64,
    survey_count: i64,
    recommend_count: i64,
    scores: Vec<f64>,
}

impl Accumulator {
    fn add(&mut self, m: &EventMetrics) {
        self.event_count += 1;
        self.income += m.income;
        self.expense_total += m.expense_total;
        self.balance += m.balance;
        self.participant_count += m.participant_count;
        self.attendee_count += m.attendee_count;
        self.survey_count += m.survey_count;
        self.recommend_count += m.recommend_count;
        if m.has_surveys() {
            self.scores.push(m.avg_score);
        }
    }

    fn finish(self, group_key: GroupKey, label: String) -> GroupMetrics {
        GroupMetrics {
            group_key,
            label,
            event_count: self.event_count,
            income: self.income,
            expense_total: self.expense_total,
            balance: self.balance,
            participant_count: self.participant_count,
            attendee_count: self.attendee_count,
            attendance_rate_pct: pct(self.attendee_count, self.participant_count),
            survey_count: self.survey_count,
            recommend_count: self.recommend_count,
            recommend_pct: pct(self.recommend_count, self.survey_count),
            surveyed_event_count: self.scores.len() as i64,
            avg_score: round_score(mean(&self.scores).unwrap_or(0.0)),
        }
    }
}

/// Bucket `metrics` by `key_fn`.
///
/// Groups come out in order of first appearance in `metrics`, so the
/// result is deterministic for a given input order. Empty groups are
/// never emitted.
pub fn group_by<F>(metrics: &[EventMetrics], key_fn: F, labeler: &GroupLabeler) -> Vec<GroupMetrics>
where
    F: Fn(&EventMetrics) -> GroupKey,
{
    let mut order: Vec<GroupKey> = Vec::new();
    let mut buckets: HashMap<GroupKey, Accumulator> = HashMap::new();

    for m in metrics {
        let key = key_fn(m);
        buckets
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Accumulator::default()
            })
            .add(m);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let acc = buckets.remove(&key)?;
            let label = labeler.label(&key);
            Some(acc.finish(key, label))
        })
        .collect()
}

/// Overall totals. Always returns a bucket; all zeros for no events.
pub fn summarize(metrics: &[EventMetrics]) -> GroupMetrics {
    let mut acc = Accumulator::default();
    for m in metrics {
        acc.add(m);
    }
    acc.finish(GroupKey::All, "Total".into())
}
