//! Ranking engine: best group per metric.
//!
//! Tie-break: the earliest group in input order wins. A later group only
//! replaces the current leader when it is strictly greater.

use crate::group_aggregator::{GroupKey, GroupMetrics};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    EventCount,
    Participants,
    Income,
    ExpenseTotal,
    Balance,
    AttendanceRate,
    Satisfaction,
    RecommendRate,
}

impl RankMetric {
    pub const ALL: [RankMetric; 8] = [
        RankMetric::EventCount,
        RankMetric::Participants,
        RankMetric::Income,
        RankMetric::ExpenseTotal,
        RankMetric::Balance,
        RankMetric::AttendanceRate,
        RankMetric::Satisfaction,
        RankMetric::RecommendRate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RankMetric::EventCount     => "event_count",
            RankMetric::Participants   => "participants",
            RankMetric::Income         => "income",
            RankMetric::ExpenseTotal   => "expense_total",
            RankMetric::Balance        => "balance",
            RankMetric::AttendanceRate => "attendance_rate",
            RankMetric::Satisfaction   => "satisfaction",
            RankMetric::RecommendRate  => "recommend_rate",
        }
    }

    /// The metric value, or `None` when the group is not eligible.
    /// Ratio metrics need a non-zero denominator to compete.
    pub fn value(self, g: &GroupMetrics) -> Option<f64> {
        match self {
            RankMetric::EventCount   => Some(g.event_count as f64),
            RankMetric::Participants => Some(g.participant_count as f64),
            RankMetric::Income       => Some(g.income),
            RankMetric::ExpenseTotal => Some(g.expense_total),
            RankMetric::Balance      => Some(g.balance),
            RankMetric::AttendanceRate => {
                (g.participant_count > 0).then_some(g.attendance_rate_pct)
            }
            RankMetric::Satisfaction  => g.has_surveys().then_some(g.avg_score),
            RankMetric::RecommendRate => (g.survey_count > 0).then_some(g.recommend_pct),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub group_key: GroupKey,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    pub metric: RankMetric,
    /// `None` means no eligible group ("no winner").
    pub winner: Option<Winner>,
}

impl RankingResult {
    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }
}

pub fn rank(groups: &[GroupMetrics], metric: RankMetric) -> RankingResult {
    let mut best: Option<(&GroupMetrics, f64)> = None;

    for g in groups {
        let Some(value) = metric.value(g) else { continue };
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((g, value)),
        }
    }

    RankingResult {
        metric,
        winner: best.map(|(g, value)| Winner {
            group_key: g.group_key.clone(),
            label: g.label.clone(),
            value,
        }),
    }
}

/// One result per metric, in `RankMetric::ALL` order.
pub fn rank_all(groups: &[GroupMetrics]) -> Vec<RankingResult> {
    RankMetric::ALL.iter().map(|&m| rank(groups, m)).collect()
}
