//! Metrics and reporting aggregation engine for event operations.
//!
//! Raw rows (events, expenses, participants, surveys, centers) are
//! fetched as one snapshot, then turned into per-event metrics, grouped
//! buckets, rankings, a monthly trend, filtered lists and CSV exports.

pub mod clock;
pub mod config;
pub mod error;
pub mod event_aggregator;
pub mod export;
pub mod extractor;
pub mod group_aggregator;
pub mod ranking;
pub mod record;
pub mod report;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod trend;
pub mod types;
pub mod view;
