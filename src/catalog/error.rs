//! Failure taxonomy for catalog reads.

use thiserror::Error;

/// The closed set of observable catalog failures.
///
/// All variants except `ServerError` carry a stable display key looked up
/// by the presentation layer at render time; `ServerError` carries the
/// server-supplied message verbatim. Nothing here is localized at the
/// point of catching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no network connectivity")]
    Offline,

    #[error("request timed out")]
    Timeout,

    #[error("network request failed")]
    NetworkError,

    #[error("{0}")]
    ServerError(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl FetchError {
    /// Display key for the presentation layer. Server errors resolve to
    /// their message instead of a key.
    pub fn display_key(&self) -> &str {
        match self {
            FetchError::Offline => "errors.offline",
            FetchError::Timeout => "errors.timeout",
            FetchError::NetworkError => "errors.networkError",
            FetchError::Unexpected(_) => "errors.unexpected",
            FetchError::ServerError(message) => message,
        }
    }
}
