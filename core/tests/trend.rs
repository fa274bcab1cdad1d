mod common;

use common::*;
use eventdesk_core::{
    config::{ReportConfig, TREND_MONTHS},
    group_aggregator::GroupLabeler,
    snapshot::Snapshot,
    trend::{build_trend, delta_pct, month_window, TrendSeries},
};
use chrono::NaiveDate;

fn trend_for(snapshot: &Snapshot, today: NaiveDate) -> TrendSeries {
    let labeler = GroupLabeler::new(&snapshot.centers, &ReportConfig::default());
    build_trend(&metrics_of(snapshot), today, TREND_MONTHS, &labeler)
}

#[test]
fn empty_input_still_yields_six_ascending_points() {
    let series = trend_for(&Snapshot::default(), today());

    assert_eq!(series.points.len(), 6);
    let labels: Vec<&str> = series.points.iter().map(|p| p.month_label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["May 2026", "Jun 2026", "Jul 2026", "Aug 2026", "Sep 2026", "Oct 2026"]
    );
    for pair in series.points.windows(2) {
        assert!(pair[0].month_start < pair[1].month_start, "points out of order");
    }
    for p in &series.points {
        assert_eq!(p.event_count, 0);
        assert_eq!(p.balance, 0.0);
    }
    assert_eq!(series.deltas.event_count, None);
}

#[test]
fn sparse_input_outside_the_window_is_ignored() {
    let snapshot = Snapshot {
        events: vec![event("old", date(2020, 1, 15), None, 3, Some(10.0))],
        ..Snapshot::default()
    };
    let series = trend_for(&snapshot, today());

    assert_eq!(series.points.len(), 6);
    assert!(series.points.iter().all(|p| p.event_count == 0));
}

#[test]
fn window_crosses_the_year_boundary() {
    let window = month_window(date(2026, 2, 28), 6);
    assert_eq!(window.first(), Some(&date(2025, 9, 1)));
    assert_eq!(window.last(), Some(&date(2026, 2, 1)));
    assert_eq!(window.len(), 6);
}

#[test]
fn events_land_in_the_month_of_their_own_date() {
    let snapshot = Snapshot {
        events: vec![
            event("aug", date(2026, 8, 31), None, 2, Some(10.0)),
            event("sep", date(2026, 9, 1), None, 4, Some(10.0)),
        ],
        // An expense row carries no date; it follows its event.
        expenses: vec![expense("aug", 5.0)],
        participants: participants("sep", 3, 2),
        ..Snapshot::default()
    };
    let series = trend_for(&snapshot, today());

    let aug = &series.points[3];
    assert_eq!(aug.month_label, "Aug 2026");
    assert_eq!(aug.event_count, 1);
    assert_eq!(aug.income, 20.0);
    assert_eq!(aug.expense_total, 5.0);
    assert_eq!(aug.balance, 15.0);

    let sep = &series.points[4];
    assert_eq!(sep.event_count, 1);
    assert_eq!(sep.participant_count, 3);
    assert_eq!(sep.income, 40.0);
}

/// 0 events last month, 3 this month: the delta is undefined, not +300%.
#[test]
fn delta_from_zero_is_undefined() {
    let snapshot = Snapshot {
        events: vec![
            event("a", date(2026, 10, 1), None, 1, Some(10.0)),
            event("b", date(2026, 10, 5), None, 1, Some(10.0)),
            event("c", date(2026, 10, 9), None, 1, Some(10.0)),
        ],
        participants: participants("a", 4, 4),
        ..Snapshot::default()
    };
    let series = trend_for(&snapshot, today());

    assert_eq!(series.points[5].event_count, 3);
    assert_eq!(series.points[4].event_count, 0);
    assert_eq!(series.deltas.event_count, None);
    assert_eq!(series.deltas.participant_count, None);
    assert_eq!(series.deltas.balance, None);
}

#[test]
fn delta_compares_the_last_two_points() {
    let mut parts = participants("s1", 6, 6);
    parts.extend(participants("s2", 4, 4));
    parts.extend(participants("o1", 5, 5));
    let snapshot = Snapshot {
        events: vec![
            event("s1", date(2026, 9, 3), None, 5, Some(10.0)),
            event("s2", date(2026, 9, 20), None, 5, Some(10.0)),
            event("o1", date(2026, 10, 2), None, 10, Some(10.0)),
            event("o2", date(2026, 10, 6), None, 5, Some(10.0)),
            event("o3", date(2026, 10, 8), None, 0, None),
        ],
        participants: parts,
        ..Snapshot::default()
    };
    let series = trend_for(&snapshot, today());

    // Sep: 2 events, 10 participants, balance 100.
    // Oct: 3 events,  5 participants, balance 150.
    assert_eq!(series.deltas.event_count, Some(50.0));
    assert_eq!(series.deltas.participant_count, Some(-50.0));
    assert_eq!(series.deltas.balance, Some(50.0));
}

#[test]
fn delta_formula() {
    assert_eq!(delta_pct(0.0, 3.0), None);
    assert_eq!(delta_pct(0.0, 0.0), None);
    assert_eq!(delta_pct(4.0, 5.0), Some(25.0));
    assert_eq!(delta_pct(4.0, 0.0), Some(-100.0));
}
