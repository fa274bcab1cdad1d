//! report-runner: headless report runner for the events metrics engine.
//!
//! Usage:
//!   report-runner --db events.db --report centers --period last_quarter
//!   report-runner --snapshot snapshot.json --report dashboard --today 2026-10-17
//!   report-runner --db events.db --report financial --export ./exports

use anyhow::{Context, Result};
use chrono::NaiveDate;
use eventdesk_core::{
    clock::ReportClock,
    config::ReportConfig,
    group_aggregator::GroupMetrics,
    report::{Report, ReportEngine, ReportKind},
    snapshot::Snapshot,
    source::{CenterScope, DataSource},
    store::EventStore,
    trend::TrendSeries,
    view::{Period, SortOrder, StatusFilter, ViewQuery},
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = arg_value(&args, "--data-dir").unwrap_or("./data");
    let kind_arg = arg_value(&args, "--report").unwrap_or("dashboard");
    let kind = ReportKind::parse(kind_arg)
        .with_context(|| format!("unknown report '{kind_arg}' (dashboard|financial|centers)"))?;
    let as_json = args.iter().any(|a| a == "--json");

    let config = if Path::new(&format!("{data_dir}/report_config.json")).exists() {
        ReportConfig::load(data_dir)?
    } else {
        log::warn!("no report_config.json in {data_dir}; using defaults");
        ReportConfig::default()
    };
    let clock = match arg_value(&args, "--today") {
        Some(raw) => ReportClock::fixed(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("--today expects YYYY-MM-DD, got '{raw}'"))?,
        ),
        None => ReportClock::System,
    };
    let query = parse_query(&args, &config)?;
    let scope = match arg_value(&args, "--centers") {
        Some(list) => CenterScope::Centers(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        ),
        None => CenterScope::All,
    };

    let engine = ReportEngine::new(config, clock);

    let source: Box<dyn DataSource> = match arg_value(&args, "--snapshot") {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read snapshot {path}"))?;
            Box::new(Snapshot::from_json(&json)?)
        }
        None => {
            let db = arg_value(&args, "--db").unwrap_or(":memory:");
            let store = EventStore::open(db)?;
            store.migrate()?;
            Box::new(store)
        }
    };

    let (snapshot, report) = engine.run(source.as_ref(), &scope, kind, &query)?;

    if let Some(path) = arg_value(&args, "--dump-snapshot") {
        std::fs::write(path, snapshot.to_json()?)
            .with_context(|| format!("cannot write snapshot {path}"))?;
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if let Some(dir) = arg_value(&args, "--export") {
        let document = engine.export(&snapshot, &report)?;
        let path = document.write_to(Path::new(dir))?;
        if !as_json {
            println!();
            println!("  exported: {} ({})", path.display(), document.mime);
        }
    }

    Ok(())
}

fn parse_query(args: &[String], config: &ReportConfig) -> Result<ViewQuery> {
    let period = match arg_value(args, "--period").unwrap_or("all") {
        "month" | "last_month"     => Period::LastMonth,
        "quarter" | "last_quarter" => Period::LastQuarter,
        "year" | "last_year"       => Period::LastYear,
        "all" | "all_time"         => Period::AllTime,
        other => anyhow::bail!("unknown period '{other}'"),
    };
    let status = match arg_value(args, "--status") {
        Some(category) => {
            if !config.status_categories.iter().any(|c| c.eq_ignore_ascii_case(category)) {
                log::warn!("status '{category}' is not a configured category; matching anyway");
            }
            StatusFilter::category(category)
        }
        None => StatusFilter::Any,
    };
    let sort = match arg_value(args, "--sort") {
        None => config.default_sort,
        Some("date")         => SortOrder::DateDesc,
        Some("balance")      => SortOrder::BalanceDesc,
        Some("participants") => SortOrder::ParticipantsDesc,
        Some(other) => anyhow::bail!("unknown sort '{other}'"),
    };
    Ok(ViewQuery { period, status, sort })
}

fn print_summary(report: &Report) {
    println!("=== {} ({}) ===", report.kind().slug().to_uppercase(), report.today());
    match report {
        Report::Dashboard(r) => {
            print_totals(&r.kpis);
            print_trend(&r.trend);
            println!();
            println!("  top centers:");
            for ranking in &r.top_centers {
                match &ranking.winner {
                    Some(w) => println!("    {:<14} {} ({:.1})", ranking.metric.name(), w.label, w.value),
                    None    => println!("    {:<14} (no winner)", ranking.metric.name()),
                }
            }
        }
        Report::FinancialSummary(r) => {
            print_totals(&r.totals);
            println!();
            println!("  by type:");
            for g in &r.by_type {
                println!("    {:<20} events={:<4} balance={:.2}", g.label, g.event_count, g.balance);
            }
            println!("  by month:");
            for g in &r.by_month {
                println!("    {:<20} events={:<4} balance={:.2}", g.label, g.event_count, g.balance);
            }
        }
        Report::CenterComparison(r) => {
            print_totals(&r.totals);
            println!();
            for g in &r.centers {
                println!(
                    "  {:<20} events={:<4} participants={:<5} attendance={:>3}% balance={:.2}",
                    g.label, g.event_count, g.participant_count, g.attendance_rate_pct, g.balance
                );
            }
            println!();
            for ranking in &r.rankings {
                match &ranking.winner {
                    Some(w) => println!("  best {:<16} {} ({:.1})", ranking.metric.name(), w.label, w.value),
                    None    => println!("  best {:<16} (no winner)", ranking.metric.name()),
                }
            }
        }
    }
}

fn print_totals(g: &GroupMetrics) {
    println!("  events:         {}", g.event_count);
    println!("  participants:   {}", g.participant_count);
    println!("  attendance:     {}%", g.attendance_rate_pct);
    println!("  income:         {:.2}", g.income);
    println!("  expenses:       {:.2}", g.expense_total);
    println!("  balance:        {:.2}", g.balance);
    if g.has_surveys() {
        println!("  satisfaction:   {:.1} ({}% recommend)", g.avg_score, g.recommend_pct);
    } else {
        println!("  satisfaction:   (no surveys)");
    }
}

fn print_trend(trend: &TrendSeries) {
    println!();
    println!("  trend:");
    for p in &trend.points {
        println!(
            "    {:<10} events={:<4} participants={:<5} balance={:.2}",
            p.month_label, p.event_count, p.participant_count, p.balance
        );
    }
    let fmt = |d: Option<f64>| d.map_or_else(|| "n/a".to_string(), |v| format!("{v:+.1}%"));
    println!(
        "    delta: events {} | participants {} | balance {}",
        fmt(trend.deltas.event_count),
        fmt(trend.deltas.participant_count),
        fmt(trend.deltas.balance),
    );
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
