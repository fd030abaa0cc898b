use thiserror::Error;

/// Unified error type for the value renderer.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to render empty input")]
    EmptyInput,

    #[error("metadata lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("unsupported value type: {0}")]
    UnsupportedType(String),

    #[error("no denomination found in `{0}`")]
    NoDenominationFound(String),

    #[error("invalid amount `{0}`")]
    InvalidAmount(String),

    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("metadata lookup cancelled")]
    Cancelled,

    #[error("metadata lookup deadline exceeded")]
    DeadlineExceeded,
}

/// Errors reported by a metadata source.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("metadata not found for denom `{denom}`")]
    NotFound { denom: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Whether this error means the denom has no known metadata.
    pub fn is_metadata_not_found(&self) -> bool {
        matches!(self, Error::Lookup(LookupError::NotFound { .. }))
    }
}
