mod common;

use common::*;
use eventdesk_core::{
    clock::ReportClock,
    config::{ReportConfig, TREND_MONTHS},
    group_aggregator::GroupKey,
    ranking::RankMetric,
    report::{Report, ReportEngine, ReportKind},
    view::{Period, StatusFilter, ViewQuery},
};

fn engine() -> ReportEngine {
    ReportEngine::fixed(today())
}

fn ids<T>(rows: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
    rows.iter().map(|r| id(r).to_string()).collect()
}

#[test]
fn dashboard_kpis_cover_every_event() {
    let report = engine().dashboard(&mixed_snapshot(), &ViewQuery::default());

    assert_eq!(report.kpis.event_count, 4);
    assert_eq!(report.kpis.income, 220.0);
    assert_eq!(report.kpis.expense_total, 75.0);
    assert_eq!(report.kpis.balance, 145.0);
    assert_eq!(report.kpis.participant_count, 102);
    assert_eq!(report.kpis.attendance_rate_pct, 54.0);
    assert_eq!(report.kpis.recommend_pct, 67.0);
    assert_eq!(report.kpis.avg_score, 3.8);

    assert_eq!(
        ids(&report.events, |m| &m.event_id),
        vec!["e4", "e3", "e2", "e1"],
        "newest first by default"
    );
}

#[test]
fn dashboard_trend_and_top_centers() {
    let report = engine().dashboard(&mixed_snapshot(), &ViewQuery::default());

    let sep = &report.trend.points[4];
    let oct = &report.trend.points[5];
    assert_eq!((sep.event_count, sep.participant_count, sep.balance), (2, 12, 160.0));
    assert_eq!((oct.event_count, oct.participant_count, oct.balance), (2, 90, -15.0));
    assert_eq!(report.trend.deltas.event_count, Some(0.0));
    assert_eq!(report.trend.deltas.participant_count, Some(650.0));

    let winner = |metric: RankMetric| {
        report
            .top_centers
            .iter()
            .find(|r| r.metric == metric)
            .and_then(|r| r.winner.as_ref())
            .map(|w| w.label.clone())
    };
    assert_eq!(winner(RankMetric::Participants).as_deref(), Some("Centro Norte"));
    assert_eq!(winner(RankMetric::Balance).as_deref(), Some("Centro Sur"));
    assert_eq!(winner(RankMetric::Satisfaction).as_deref(), Some("Centro Norte"));
}

#[test]
fn dashboard_trend_always_has_six_points() {
    let config: ReportConfig =
        serde_json::from_str(r#"{ "trend_months": 12, "month_label_format": "%Y-%m" }"#).unwrap();
    config.validate().unwrap();
    let engine = ReportEngine::new(config, ReportClock::fixed(today()));

    let report = engine.dashboard(&mixed_snapshot(), &ViewQuery::default());
    assert_eq!(report.trend.points.len(), TREND_MONTHS as usize);
    assert_eq!(report.trend.points.len(), 6);
    assert_eq!(report.trend.points[0].month_label, "2026-05");
    assert_eq!(report.trend.points[5].month_label, "2026-10");
}

#[test]
fn trend_ignores_the_period_filter() {
    let query = ViewQuery {
        period: Period::LastMonth,
        ..ViewQuery::default()
    };
    let report = engine().dashboard(&mixed_snapshot(), &query);

    // e1 falls before the one-month cutoff but still counts in September.
    assert_eq!(report.kpis.event_count, 3);
    assert_eq!(report.trend.points[4].event_count, 2);
}

#[test]
fn financial_summary_picks_best_balance_type() {
    let report = engine().financial_summary(&mixed_snapshot(), &ViewQuery::default());

    let types: Vec<&GroupKey> = report.by_type.iter().map(|g| &g.group_key).collect();
    assert_eq!(
        types,
        vec![
            &GroupKey::EventType("taller".into()),
            &GroupKey::EventType("concierto".into())
        ]
    );

    let best = report.best_balance_type.winner.expect("a type wins");
    assert_eq!(best.label, "taller");
    assert_eq!(best.value, 75.0);

    let months: Vec<&GroupKey> = report.by_month.iter().map(|g| &g.group_key).collect();
    assert_eq!(
        months,
        vec![
            &GroupKey::Month { year: 2026, month: 10 },
            &GroupKey::Month { year: 2026, month: 9 }
        ],
        "months newest first"
    );
    assert_eq!(report.totals.balance, 145.0);
}

#[test]
fn status_filter_applies_before_grouping() {
    let query = ViewQuery {
        status: StatusFilter::Category("COMPLETADO".into()),
        ..ViewQuery::default()
    };
    let report = engine().center_comparison(&mixed_snapshot(), &query);

    assert_eq!(report.totals.event_count, 2);
    assert_eq!(report.centers.len(), 1);
    assert_eq!(report.centers[0].label, "Centro Norte");
    assert!(report
        .rankings
        .iter()
        .filter_map(|r| r.winner.as_ref())
        .all(|w| w.group_key == GroupKey::Center(Some("c1".into()))));
}

#[test]
fn center_comparison_labels_unassigned_events() {
    let report = engine().center_comparison(&mixed_snapshot(), &ViewQuery::default());

    let labels: Vec<&str> = report.centers.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Centro Norte", "Centro Sur", "Sin centro"]);
    assert_eq!(report.rankings.len(), RankMetric::ALL.len());
}

#[test]
fn orphans_surface_on_every_report() {
    let mut snapshot = mixed_snapshot();
    snapshot.expenses.push(expense("ghost", 9.0));
    snapshot.surveys.push(survey("ghost", Some(2), None));

    for kind in [
        ReportKind::Dashboard,
        ReportKind::FinancialSummary,
        ReportKind::CenterComparison,
    ] {
        let orphans = match engine().build(&snapshot, kind, &ViewQuery::default()) {
            Report::Dashboard(r) => r.orphans,
            Report::FinancialSummary(r) => r.orphans,
            Report::CenterComparison(r) => r.orphans,
        };
        assert_eq!(orphans.expenses, 1);
        assert_eq!(orphans.surveys, 1);
        assert_eq!(orphans.participants, 0);
    }
}

#[test]
fn report_kind_names_round_trip() {
    for kind in [
        ReportKind::Dashboard,
        ReportKind::FinancialSummary,
        ReportKind::CenterComparison,
    ] {
        assert_eq!(ReportKind::parse(kind.slug()), Some(kind));
    }
    assert_eq!(ReportKind::parse("centers"), Some(ReportKind::CenterComparison));
    assert_eq!(ReportKind::parse("weekly"), None);
}
