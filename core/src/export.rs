//! Export formatter: delimited text for download.
//!
//! Format: header line, then one line per record, `\n` after every line.
//! Text fields are always double-quoted with inner quotes doubled.
//! Numbers are bare decimals with no currency symbol or grouping.

use crate::{
    error::MetricsResult,
    event_aggregator::EventMetrics,
    group_aggregator::{GroupLabeler, GroupMetrics},
    report::ReportKind,
};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CSV_MIME: &str = "text/csv;charset=utf-8";

pub const EVENT_COLUMNS: [&str; 8] = [
    "Nombre",
    "Centro",
    "Fecha",
    "Participantes",
    "Ingresos",
    "Gastos",
    "Balance",
    "Satisfacción",
];

pub const GROUP_COLUMNS: [&str; 8] = [
    "Centro",
    "Eventos",
    "Participantes",
    "Asistencia %",
    "Ingresos",
    "Gastos",
    "Balance",
    "Satisfacción",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub filename: String,
    pub mime: &'static str,
    pub body: String,
}

impl ExportDocument {
    /// Write the body to `dir/filename`; returns the full path.
    pub fn write_to(&self, dir: &Path) -> MetricsResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, self.body.as_bytes())?;
        log::info!("export written: {}", path.display());
        Ok(path)
    }
}

/// `<report-kind>_<YYYY-MM-DD>.csv`
pub fn export_filename(kind: ReportKind, date: NaiveDate) -> String {
    format!("{}_{}.csv", kind.slug(), date.format("%Y-%m-%d"))
}

/// Event-level layout.
pub fn export_events(
    kind: ReportKind,
    rows: &[EventMetrics],
    labeler: &GroupLabeler,
    date: NaiveDate,
) -> MetricsResult<ExportDocument> {
    let records = rows.iter().map(|m| {
        vec![
            quote_text(&m.name),
            quote_text(&labeler.center_name(m.center_id.as_deref())),
            quote_text(&m.date.format("%Y-%m-%d").to_string()),
            m.participant_count.to_string(),
            plain_number(m.income),
            plain_number(m.expense_total),
            plain_number(m.balance),
            satisfaction(m.has_surveys(), m.avg_score),
        ]
    });
    build_document(kind, &EVENT_COLUMNS, records, date)
}

/// Group / center-comparison layout.
pub fn export_groups(
    kind: ReportKind,
    rows: &[GroupMetrics],
    date: NaiveDate,
) -> MetricsResult<ExportDocument> {
    let records = rows.iter().map(|g| {
        vec![
            quote_text(&g.label),
            g.event_count.to_string(),
            g.participant_count.to_string(),
            plain_number(g.attendance_rate_pct),
            plain_number(g.income),
            plain_number(g.expense_total),
            plain_number(g.balance),
            satisfaction(g.has_surveys(), g.avg_score),
        ]
    });
    build_document(kind, &GROUP_COLUMNS, records, date)
}

fn build_document<I>(
    kind: ReportKind,
    header: &[&str],
    records: I,
    date: NaiveDate,
) -> MetricsResult<ExportDocument>
where
    I: Iterator<Item = Vec<String>>,
{
    // Quoting is decided per column above, so the writer must not add any.
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for record in records {
        writer.write_record(&record)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let body = String::from_utf8(bytes).map_err(|e| anyhow::anyhow!(e))?;

    Ok(ExportDocument {
        filename: export_filename(kind, date),
        mime: CSV_MIME,
        body,
    })
}

fn quote_text(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Shortest decimal that round-trips, never `-0`.
fn plain_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".into();
    }
    format!("{}", value + 0.0)
}

/// One decimal; empty without surveys, so "no opinion" is not read as 0.
fn satisfaction(surveyed: bool, score: f64) -> String {
    if surveyed {
        format!("{score:.1}")
    } else {
        String::new()
    }
}
