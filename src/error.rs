//! Error types with absence/failure classification.

/// Error type for podbrowser operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Data errors
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    // Network errors
    #[error("Fetch of {iri} failed with status {status}")]
    Fetch { iri: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),

    // System errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the error means "nothing there" rather than "something broke".
    ///
    /// Absence is shown as an empty state; everything else is a fetch
    /// failure surfaced as "could not determine access".
    pub fn is_absence(&self) -> bool {
        match self {
            Error::Fetch { status, .. } => *status == 404 || *status == 410,
            Error::Parse { .. }
            | Error::InvalidIri(_)
            | Error::Http(_)
            | Error::Config(_)
            | Error::Json(_)
            | Error::Internal(_) => false,
        }
    }

    /// Whether the server refused to show the resource to the current agent.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Fetch { status: 401 | 403, .. })
    }
}

/// Result type alias using podbrowser's Error.
pub type Result<T> = std::result::Result<T, Error>;
