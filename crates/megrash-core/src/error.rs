use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Failure to produce the canonical court set. Fatal at server startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read courts dataset at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed courts dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("courts dataset has no `{0}` column")]
    MissingColumn(&'static str),
}

/// A query the caller got wrong. Surfaced as a client error, never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Missing coordinates")]
    MissingCoordinates,

    #[error("invalid {field}: {reason}")]
    InvalidCoordinate { field: &'static str, reason: String },

    #[error("count must be non-negative, got {0}")]
    NegativeCount(i64),
}
