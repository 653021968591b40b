//! Client-side error type.

/// Failures surfaced by the admin API client.
///
/// Transport failures (connection refused, timeouts) are kept distinct from
/// API rejections so callers can tell transient conditions from permanent
/// ones.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code of the rejection.
        status: u16,
        /// Human-readable message from the error payload.
        message: String,
        /// Machine-readable code from the error payload, when present.
        code: Option<String>,
    },
}

impl ClientError {
    /// Whether retrying the same request later could plausibly succeed.
    ///
    /// Transport failures and 5xx responses are transient; 4xx rejections
    /// are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Url(_) => false,
        }
    }

    /// HTTP status of an API rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) | Self::Url(_) => None,
        }
    }
}
