use crate::view::SortOrder;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Number of monthly points on the dashboard trend chart. Fixed; the
/// trend is not configurable.
pub const TREND_MONTHS: u32 = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Status categories offered to the status filter.
    #[serde(default = "default_status_categories")]
    pub status_categories: Vec<String>,
    /// Label used for events that belong to no center.
    #[serde(default = "default_unassigned_center_label")]
    pub unassigned_center_label: String,
    /// chrono format string for trend and month-group labels.
    #[serde(default = "default_month_label_format")]
    pub month_label_format: String,
    #[serde(default)]
    pub default_sort: SortOrder,
}

fn default_status_categories() -> Vec<String> {
    ["completado", "activo", "pendiente", "cancelado"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_unassigned_center_label() -> String { "Sin centro".into() }

fn default_month_label_format() -> String { "%b %Y".into() }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            status_categories: default_status_categories(),
            unassigned_center_label: default_unassigned_center_label(),
            month_label_format: default_month_label_format(),
            default_sort: SortOrder::default(),
        }
    }
}

impl ReportConfig {
    /// Load from the data/ directory.
    /// In tests, use ReportConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/report_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ReportConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.month_label_format.trim().is_empty()
            || StrftimeItems::new(&self.month_label_format).any(|i| matches!(i, Item::Error))
        {
            anyhow::bail!("invalid month_label_format '{}'", self.month_label_format);
        }
        Ok(())
    }
}
