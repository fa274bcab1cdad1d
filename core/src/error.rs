use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One of the source fetches failed. The whole aggregation is aborted.
    #[error("Failed to fetch {entity}: {reason}")]
    DataFetch { entity: &'static str, reason: String },

    #[error("Field '{field}' is not available on {entity}")]
    InvalidField { entity: &'static str, field: String },

    #[error("Invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MetricsError {
    /// Wrap any error raised while reading `entity` as a fetch failure.
    pub fn fetch(entity: &'static str, err: impl std::fmt::Display) -> Self {
        MetricsError::DataFetch {
            entity,
            reason: err.to_string(),
        }
    }
}

pub type MetricsResult<T> = Result<T, MetricsError>;
