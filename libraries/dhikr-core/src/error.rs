/// Core error types for Dhikr Player
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Dhikr Player
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A base URL could not be used to build a link
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Track identifier was empty
    #[error("Track id cannot be empty")]
    EmptyTrackId,
}

impl From<url::ParseError> for CoreError {
    fn from(err: url::ParseError) -> Self {
        CoreError::InvalidUrl(err.to_string())
    }
}
