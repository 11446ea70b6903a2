//! Core error type for transit data.

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    /// No stop in the dataset carries this display name
    #[error("Station not found: {0}")]
    StationNotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for TransitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;
