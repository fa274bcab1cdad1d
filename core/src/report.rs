//! Report engine: the two-stage pipeline behind every view.
//!
//! STAGES (fixed, never interleaved):
//!   1. Fetch:     `fetch_snapshot` reads every source and applies the
//!                 center scope. Any failure aborts the run.
//!   2. Aggregate: pure functions over that snapshot only:
//!                 extract → per-event metrics → groups / rankings / trend
//!                 → view filters and ordering.
//!
//! RULES:
//!   - Stage 2 performs no I/O and keeps no state between runs.
//!   - The same snapshot and date always give identical output.

use crate::{
    clock::ReportClock,
    config::{ReportConfig, TREND_MONTHS},
    error::MetricsResult,
    event_aggregator::{aggregate_events, EventMetrics},
    export::{export_events, export_groups, ExportDocument},
    extractor::{extract, OrphanCounts},
    group_aggregator::{group_by, summarize, GroupLabeler, GroupMetrics, Grouping},
    ranking::{rank, rank_all, RankMetric, RankingResult},
    snapshot::Snapshot,
    source::{fetch_snapshot, CenterScope, DataSource},
    trend::{build_trend, TrendSeries},
    view::{sort_rows, SortOrder, ViewQuery},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Dashboard,
    FinancialSummary,
    CenterComparison,
}

impl ReportKind {
    /// Stable name, used as the export filename prefix.
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::Dashboard        => "dashboard",
            ReportKind::FinancialSummary => "financial_summary",
            ReportKind::CenterComparison => "center_comparison",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dashboard"                     => Some(ReportKind::Dashboard),
            "financial" | "financial_summary" => Some(ReportKind::FinancialSummary),
            "centers" | "center_comparison" => Some(ReportKind::CenterComparison),
            _ => None,
        }
    }
}

/// Stage-2 output shared by every report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub events: Vec<EventMetrics>,
    pub orphans: OrphanCounts,
}

pub fn aggregate(snapshot: &Snapshot) -> Aggregation {
    let extracted = extract(snapshot);
    let events = aggregate_events(&extracted);
    Aggregation {
        events,
        orphans: extracted.orphans,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub today: NaiveDate,
    pub kpis: GroupMetrics,
    pub trend: TrendSeries,
    pub events: Vec<EventMetrics>,
    pub top_centers: Vec<RankingResult>,
    pub orphans: OrphanCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub today: NaiveDate,
    pub totals: GroupMetrics,
    pub events: Vec<EventMetrics>,
    pub by_type: Vec<GroupMetrics>,
    pub by_month: Vec<GroupMetrics>,
    pub best_balance_type: RankingResult,
    pub orphans: OrphanCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterComparison {
    pub today: NaiveDate,
    pub totals: GroupMetrics,
    pub centers: Vec<GroupMetrics>,
    pub rankings: Vec<RankingResult>,
    pub orphans: OrphanCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Dashboard(Dashboard),
    FinancialSummary(FinancialSummary),
    CenterComparison(CenterComparison),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Dashboard(_)        => ReportKind::Dashboard,
            Report::FinancialSummary(_) => ReportKind::FinancialSummary,
            Report::CenterComparison(_) => ReportKind::CenterComparison,
        }
    }

    pub fn today(&self) -> NaiveDate {
        match self {
            Report::Dashboard(r)        => r.today,
            Report::FinancialSummary(r) => r.today,
            Report::CenterComparison(r) => r.today,
        }
    }
}

pub struct ReportEngine {
    pub config: ReportConfig,
    pub clock: ReportClock,
}

impl ReportEngine {
    pub fn new(config: ReportConfig, clock: ReportClock) -> Self {
        Self { config, clock }
    }

    /// Default config and a pinned date. Used by tests.
    pub fn fixed(today: NaiveDate) -> Self {
        Self::new(ReportConfig::default(), ReportClock::fixed(today))
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Headline KPIs, the monthly trend, and the filtered event list.
    pub fn dashboard(&self, snapshot: &Snapshot, query: &ViewQuery) -> Dashboard {
        let today = self.today();
        let labeler = self.labeler(snapshot);
        let aggregation = aggregate(snapshot);

        let filtered = query.filter(&aggregation.events, today);
        let kpis = summarize(&filtered);

        // The trend owns its window; only the status filter narrows it.
        let status_only = ViewQuery {
            status: query.status.clone(),
            ..ViewQuery::default()
        };
        let trend = build_trend(
            &status_only.filter(&aggregation.events, today),
            today,
            TREND_MONTHS,
            &labeler,
        );

        let centers = group_by(&filtered, Grouping::Center.key_fn(), &labeler);
        let top_centers = [RankMetric::Participants, RankMetric::Balance, RankMetric::Satisfaction]
            .iter()
            .map(|&m| rank(&centers, m))
            .collect();

        log::info!(
            "report computed: kind=dashboard events={} today={today}",
            filtered.len()
        );

        Dashboard {
            today,
            kpis,
            trend,
            events: sort_rows(&filtered, query.sort),
            top_centers,
            orphans: aggregation.orphans,
        }
    }

    /// Income/expense per event, per event type and per month.
    pub fn financial_summary(&self, snapshot: &Snapshot, query: &ViewQuery) -> FinancialSummary {
        let today = self.today();
        let labeler = self.labeler(snapshot);
        let aggregation = aggregate(snapshot);

        let filtered = query.filter(&aggregation.events, today);
        let by_type = group_by(&filtered, Grouping::EventType.key_fn(), &labeler);
        let by_month = sort_rows(
            &group_by(&filtered, Grouping::Month.key_fn(), &labeler),
            SortOrder::DateDesc,
        );
        let best_balance_type = rank(&by_type, RankMetric::Balance);

        log::info!(
            "report computed: kind=financial_summary events={} today={today}",
            filtered.len()
        );

        FinancialSummary {
            today,
            totals: summarize(&filtered),
            events: sort_rows(&filtered, query.sort),
            by_type,
            by_month,
            best_balance_type,
            orphans: aggregation.orphans,
        }
    }

    /// One row per center plus the winner of every ranked metric.
    pub fn center_comparison(&self, snapshot: &Snapshot, query: &ViewQuery) -> CenterComparison {
        let today = self.today();
        let labeler = self.labeler(snapshot);
        let aggregation = aggregate(snapshot);

        let filtered = query.filter(&aggregation.events, today);
        let grouped = group_by(&filtered, Grouping::Center.key_fn(), &labeler);
        // Rank before sorting so ties resolve on snapshot order.
        let rankings = rank_all(&grouped);

        log::info!(
            "report computed: kind=center_comparison events={} centers={} today={today}",
            filtered.len(),
            grouped.len()
        );

        CenterComparison {
            today,
            totals: summarize(&filtered),
            centers: sort_rows(&grouped, query.sort),
            rankings,
            orphans: aggregation.orphans,
        }
    }

    /// Stage 2 for an already-fetched snapshot.
    pub fn build(&self, snapshot: &Snapshot, kind: ReportKind, query: &ViewQuery) -> Report {
        match kind {
            ReportKind::Dashboard => Report::Dashboard(self.dashboard(snapshot, query)),
            ReportKind::FinancialSummary => {
                Report::FinancialSummary(self.financial_summary(snapshot, query))
            }
            ReportKind::CenterComparison => {
                Report::CenterComparison(self.center_comparison(snapshot, query))
            }
        }
    }

    /// Fetch, then aggregate. A failed fetch returns before any
    /// aggregation happens.
    pub fn run<S>(
        &self,
        source: &S,
        scope: &CenterScope,
        kind: ReportKind,
        query: &ViewQuery,
    ) -> MetricsResult<(Snapshot, Report)>
    where
        S: DataSource + ?Sized,
    {
        let snapshot = fetch_snapshot(source, scope)?;
        let report = self.build(&snapshot, kind, query);
        Ok((snapshot, report))
    }

    /// CSV for a computed report. Event lists use the event layout; the
    /// center comparison uses the group layout.
    pub fn export(&self, snapshot: &Snapshot, report: &Report) -> MetricsResult<ExportDocument> {
        let labeler = self.labeler(snapshot);
        match report {
            Report::Dashboard(r) => export_events(report.kind(), &r.events, &labeler, r.today),
            Report::FinancialSummary(r) => {
                export_events(report.kind(), &r.events, &labeler, r.today)
            }
            Report::CenterComparison(r) => export_groups(report.kind(), &r.centers, r.today),
        }
    }

    fn labeler(&self, snapshot: &Snapshot) -> GroupLabeler {
        GroupLabeler::new(&snapshot.centers, &self.config)
    }
}
