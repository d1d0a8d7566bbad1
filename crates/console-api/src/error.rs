//! Error types for remote console API calls.
//!
//! The scheduler's retry-vs-stop decision hinges on [`ApiError::is_fatal`]:
//! configuration mistakes (wrong base URL, bad token) are never retried,
//! everything else is retried on the next poll interval.

use thiserror::Error;

/// Error type for all remote console API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote returned 404 for the console endpoint. Almost always a
    /// misconfigured base URL, so retrying cannot help.
    #[error("console endpoint not found at {url} — check the configured base URL")]
    PathInvalid {
        /// The URL that was requested.
        url: String,
    },

    /// The remote returned 403: the access token was rejected.
    #[error("the remote console rejected the access token")]
    AuthInvalid,

    /// The request exceeded the transport deadline. Transient; the next
    /// poll cycle retries.
    #[error("request to {url} timed out")]
    Timeout {
        /// The URL that was requested.
        url: String,
    },

    /// The remote returned a non-success status outside the taxonomy above.
    #[error("unexpected status {status} from the console endpoint")]
    UnexpectedStatus {
        /// The HTTP status code returned by the remote.
        status: u16,
    },

    /// Network or decode failure from reqwest (connect errors, TLS
    /// failures, malformed response bodies). Transient.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    /// The configured console URL could not be parsed.
    #[error("invalid console URL {url}: {source}")]
    InvalidUrl {
        /// The URL string that failed to parse.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    /// Whether this error is a configuration mistake that retrying
    /// cannot resolve.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ApiError::PathInvalid { .. } | ApiError::AuthInvalid | ApiError::InvalidUrl { .. }
        )
    }

    /// Classifies a reqwest error, splitting timeouts out of the
    /// general transport bucket.
    pub(crate) fn from_reqwest(err: reqwest::Error, url: &url::Url) -> Self {
        if err.is_timeout() {
            ApiError::Timeout {
                url: url.to_string(),
            }
        } else {
            ApiError::Transport(err)
        }
    }
}

/// Convenience Result alias for console API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_invalid_display() {
        let err = ApiError::PathInvalid {
            url: "http://host/api/".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("http://host/api/"));
        assert!(display.contains("base URL"));
    }

    #[test]
    fn unexpected_status_display() {
        let err = ApiError::UnexpectedStatus { status: 502 };
        assert_eq!(
            format!("{err}"),
            "unexpected status 502 from the console endpoint"
        );
    }

    #[test]
    fn fatality_table() {
        assert!(ApiError::PathInvalid { url: "u".into() }.is_fatal());
        assert!(ApiError::AuthInvalid.is_fatal());
        assert!(!ApiError::Timeout { url: "u".into() }.is_fatal());
        assert!(!ApiError::UnexpectedStatus { status: 500 }.is_fatal());
    }
}
