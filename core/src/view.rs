//! View filter/sorter: presentation transforms over metrics lists.
//!
//! Each step takes a slice and returns a new Vec. Order of application:
//! period, then status, then sort.

use crate::{event_aggregator::EventMetrics, group_aggregator::GroupMetrics};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    LastMonth,
    LastQuarter,
    LastYear,
    #[default]
    AllTime,
}

impl Period {
    /// Earliest date kept, or `None` for no lower bound.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        let months = match self {
            Period::LastMonth   => 1,
            Period::LastQuarter => 3,
            Period::LastYear    => 12,
            Period::AllTime     => return None,
        };
        today.checked_sub_months(Months::new(months))
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.cutoff(today) {
            Some(cutoff) => date >= cutoff,
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    Any,
    /// Case-insensitive substring match against the free-text status.
    Category(String),
}

impl StatusFilter {
    pub fn category(name: impl Into<String>) -> Self {
        StatusFilter::Category(name.into())
    }

    pub fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Category(c) => status.to_lowercase().contains(&c.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    BalanceDesc,
    ParticipantsDesc,
}

/// A row the sorter can order.
pub trait ViewRow {
    /// `None` sorts after every dated row.
    fn row_date(&self) -> Option<NaiveDate>;
    fn row_balance(&self) -> f64;
    fn row_participants(&self) -> i64;
}

impl ViewRow for EventMetrics {
    fn row_date(&self) -> Option<NaiveDate> { Some(self.date) }
    fn row_balance(&self) -> f64 { self.balance }
    fn row_participants(&self) -> i64 { self.participant_count }
}

impl ViewRow for GroupMetrics {
    fn row_date(&self) -> Option<NaiveDate> { self.group_key.month_start() }
    fn row_balance(&self) -> f64 { self.balance }
    fn row_participants(&self) -> i64 { self.participant_count }
}

pub fn filter_period(rows: &[EventMetrics], period: Period, today: NaiveDate) -> Vec<EventMetrics> {
    rows.iter()
        .filter(|m| period.contains(m.date, today))
        .cloned()
        .collect()
}

pub fn filter_status(rows: &[EventMetrics], status: &StatusFilter) -> Vec<EventMetrics> {
    rows.iter()
        .filter(|m| status.matches(&m.status))
        .cloned()
        .collect()
}

/// Stable sort; equal keys keep their input order.
pub fn sort_rows<T: ViewRow + Clone>(rows: &[T], order: SortOrder) -> Vec<T> {
    let mut sorted = rows.to_vec();
    match order {
        SortOrder::DateDesc => sorted.sort_by(|a, b| match (a.row_date(), b.row_date()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortOrder::BalanceDesc => {
            sorted.sort_by(|a, b| b.row_balance().total_cmp(&a.row_balance()))
        }
        SortOrder::ParticipantsDesc => {
            sorted.sort_by(|a, b| b.row_participants().cmp(&a.row_participants()))
        }
    }
    sorted
}

/// Everything a list view asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub sort: SortOrder,
}

impl ViewQuery {
    /// Period and status filters only. Grouped reports filter events
    /// with this before bucketing.
    pub fn filter(&self, rows: &[EventMetrics], today: NaiveDate) -> Vec<EventMetrics> {
        let in_period = filter_period(rows, self.period, today);
        filter_status(&in_period, &self.status)
    }

    pub fn apply(&self, rows: &[EventMetrics], today: NaiveDate) -> Vec<EventMetrics> {
        sort_rows(&self.filter(rows, today), self.sort)
    }
}
