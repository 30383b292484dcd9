//! Error types for classification requests.

use thiserror::Error;

/// Boxed source error from the transport layer
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures that end a classification request.
///
/// Malformed lines inside the response body are not errors; they are skipped
/// by the parser and reported through [`crate::parsers::SkippedLine`].
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Sending the request or reading the body failed
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The body contained no records at all
    #[error("missing expected response")]
    MissingResponse,

    /// First record was neither complete nor an accepted status
    #[error("expected a completed response (status: {})", .status.as_deref().unwrap_or("none"))]
    UnexpectedResponse { status: Option<String> },

    /// First record carried an `error` field
    #[error("inference endpoint returned an error: {0}")]
    Remote(String),

    #[error("request cancelled")]
    Cancelled,
}

impl ClassifyError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }
}

impl From<reqwest::Error> for ClassifyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}
