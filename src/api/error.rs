//! Failures of a single REST round-trip, before they are folded into an envelope.

/// Transport and application failures of the hospital backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Hospital backend is not reachable at {0}")]
    Connection(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP client error: {0}")]
    Http(String),
    /// Non-2xx answer. `message` is the server's `{message}` field when present.
    #[error("Backend rejected the request (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },
    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
    /// A path segment of `.` or `..`, which URL normalization would drop.
    #[error("Path segment made only of dots cannot be addressed")]
    DotSegment,
}

impl ApiError {
    /// True when the request never got an answer from the backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_) | Self::Http(_))
    }

    /// Message suitable for the user.
    ///
    /// A rejection with a server message shows that message verbatim;
    /// everything else collapses to the caller's default.
    pub fn user_message(&self, default: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => default.to_string(),
        }
    }
}
