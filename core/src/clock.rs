//! Report clock: the single source of "today" for period filters and
//! trend windows.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReportClock {
    /// Follow the local wall clock.
    System,
    /// Pinned date. Used by tests and by `--today` in report-runner.
    Fixed { today: NaiveDate },
}

impl ReportClock {
    pub fn fixed(today: NaiveDate) -> Self {
        ReportClock::Fixed { today }
    }

    pub fn today(&self) -> NaiveDate {
        match self {
            ReportClock::System         => Local::now().date_naive(),
            ReportClock::Fixed { today } => *today,
        }
    }
}

impl Default for ReportClock {
    fn default() -> Self { ReportClock::System }
}
