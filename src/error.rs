use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures of the sales sync job, one variant per pipeline stage.
///
/// Every variant carries the cause reported by the data layer so the
/// trigger (CLI, scheduler) can surface it verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// The order line-item query failed. Nothing was written.
    #[error("sales aggregation failed: {cause}")]
    Aggregation { cause: String },

    /// The snapshot could not be stored. Metadata was not touched.
    #[error("snapshot cache write failed: {cause}")]
    Snapshot { cause: String },

    /// Popularity metadata reconciliation failed after the snapshot was stored.
    #[error("popularity sync failed: {cause}")]
    Sync { cause: String },
}

impl JobError {
    /// The underlying data-layer cause.
    #[must_use]
    pub fn cause(&self) -> &str {
        match self {
            Self::Aggregation { cause } | Self::Snapshot { cause } | Self::Sync { cause } => cause,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Job(#[from] JobError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
