//! Trend series builder: monthly points ending with the current month.
//!
//! An event lands in the bucket of its own date. Months with no events
//! still produce a zeroed point, so the series length is fixed.

use crate::{
    event_aggregator::EventMetrics,
    group_aggregator::{GroupKey, GroupLabeler},
};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month_label: String,
    pub month_start: NaiveDate,
    pub event_count: i64,
    pub participant_count: i64,
    pub income: f64,
    pub expense_total: f64,
    pub balance: f64,
}

/// Period-over-period change between the last two points, in percent.
/// `None` when the previous value is 0 and the change has no meaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDeltas {
    pub event_count: Option<f64>,
    pub participant_count: Option<f64>,
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
    pub deltas: TrendDeltas,
}

/// `(curr − prev) / prev × 100`; undefined for `prev == 0`.
pub fn delta_pct(prev: f64, curr: f64) -> Option<f64> {
    if prev == 0.0 {
        return None;
    }
    Some((curr - prev) / prev * 100.0)
}

/// First day of each of the `months` calendar months ending with the
/// month of `today`, oldest first.
pub fn month_window(today: NaiveDate, months: u32) -> Vec<NaiveDate> {
    let Some(current) = today.with_day(1) else {
        return Vec::new();
    };
    (0..months)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

pub fn build_trend(
    metrics: &[EventMetrics],
    today: NaiveDate,
    months: u32,
    labeler: &GroupLabeler,
) -> TrendSeries {
    let mut points: Vec<TrendPoint> = month_window(today, months)
        .into_iter()
        .map(|start| TrendPoint {
            month_label: labeler.month_label(start.year(), start.month()),
            month_start: start,
            event_count: 0,
            participant_count: 0,
            income: 0.0,
            expense_total: 0.0,
            balance: 0.0,
        })
        .collect();

    for m in metrics {
        let key = GroupKey::month_of(m.date);
        let Some(bucket_start) = key.month_start() else { continue };
        // Events outside the window are ignored.
        if let Some(point) = points.iter_mut().find(|p| p.month_start == bucket_start) {
            point.event_count += 1;
            point.participant_count += m.participant_count;
            point.income += m.income;
            point.expense_total += m.expense_total;
            point.balance += m.balance;
        }
    }

    let deltas = match points.as_slice() {
        [.., prev, curr] => TrendDeltas {
            event_count: delta_pct(prev.event_count as f64, curr.event_count as f64),
            participant_count: delta_pct(
                prev.participant_count as f64,
                curr.participant_count as f64,
            ),
            balance: delta_pct(prev.balance, curr.balance),
        },
        _ => TrendDeltas::default(),
    };

    TrendSeries { points, deltas }
}
