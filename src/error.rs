use std::time::Duration;

use reqwest::StatusCode;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum NovuError {
    /// Network or request execution error from `reqwest`.
    #[error("failed to execute request: {0}")]
    Transport(#[source] reqwest::Error),
    /// HTTP 429 from the API.
    #[error("request was not successful, status code 429, {body}")]
    RateLimited {
        body: String,
        /// Server-provided `Retry-After` hint, if any.
        retry_after: Option<Duration>,
    },
    /// HTTP 503 from the API.
    #[error("request was not successful, status code 503, {body}")]
    Unavailable {
        body: String,
        retry_after: Option<Duration>,
    },
    /// Any other 4xx status.
    #[error("request was not successful, status code {status}, {body}")]
    Client { status: u16, body: String },
    /// Any 5xx status other than 503.
    #[error("request was not successful, status code {status}, {body}")]
    Server { status: u16, body: String },
    /// A 3xx status that the transport did not follow.
    #[error("request was not successful, status code {status}, {body}")]
    Redirect { status: u16, body: String },
    /// Response body could not be parsed into the expected type.
    #[error("unable to unmarshal response body: {source}; body: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    /// Request body could not be serialized.
    #[error("unable to marshal request body: {0}")]
    Encode(#[source] serde_json::Error),
    /// Request payload has a shape the endpoint cannot accept.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// The call succeeded but with a status the operation does not accept.
    #[error("unexpected status code {actual}, expected {expected}")]
    UnexpectedStatus { expected: u16, actual: u16 },
    /// The per-call deadline expired before a terminal outcome was reached.
    #[error("deadline of {deadline_ms} ms exceeded")]
    DeadlineExceeded { deadline_ms: u64 },
    #[error("configuration error: {0}")]
    Config(String),
}

impl NovuError {
    /// Classifies a non-success HTTP status into the matching variant.
    pub fn from_status(status: StatusCode, body: String, retry_after: Option<Duration>) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited { body, retry_after },
            StatusCode::SERVICE_UNAVAILABLE => Self::Unavailable { body, retry_after },
            s if s.is_client_error() => Self::Client {
                status: s.as_u16(),
                body,
            },
            s if s.is_server_error() => Self::Server {
                status: s.as_u16(),
                body,
            },
            s => Self::Redirect {
                status: s.as_u16(),
                body,
            },
        }
    }

    /// HTTP status code carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::Unavailable { .. } => Some(503),
            Self::Client { status, .. }
            | Self::Server { status, .. }
            | Self::Redirect { status, .. } => Some(*status),
            Self::UnexpectedStatus { actual, .. } => Some(*actual),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body text carried by this error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::RateLimited { body, .. }
            | Self::Unavailable { body, .. }
            | Self::Client { body, .. }
            | Self::Server { body, .. }
            | Self::Redirect { body, .. }
            | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether the executor may retry the attempt that produced this error.
    ///
    /// `Server` errors are only retried when the retry policy opts in; see
    /// [`RetryPolicy::with_server_error_retries`](crate::RetryPolicy::with_server_error_retries).
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Unavailable { .. } => true,
            Self::Transport(err) => is_retryable_transport(err),
            _ => false,
        }
    }

    /// `Retry-After` hint attached to a 429 or 503 response.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } | Self::Unavailable { retry_after, .. } => {
                *retry_after
            }
            _ => None,
        }
    }
}

fn is_retryable_transport(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request() || err.is_body()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;

    use super::NovuError;

    #[test]
    fn classifies_rate_limit_and_unavailable_as_retryable() {
        let limited = NovuError::from_status(
            StatusCode::TOO_MANY_REQUESTS,
            "slow down".to_owned(),
            Some(Duration::from_secs(2)),
        );
        assert!(matches!(limited, NovuError::RateLimited { .. }));
        assert!(limited.is_retryable());
        assert_eq!(limited.retry_after(), Some(Duration::from_secs(2)));

        let unavailable =
            NovuError::from_status(StatusCode::SERVICE_UNAVAILABLE, String::new(), None);
        assert!(matches!(unavailable, NovuError::Unavailable { .. }));
        assert_eq!(unavailable.status(), Some(503));
        assert!(unavailable.is_retryable());
    }

    #[test]
    fn classifies_not_found_as_client_error_with_body() {
        let err = NovuError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"message":"not found"}"#.to_owned(),
            None,
        );
        match &err {
            NovuError::Client { status, body } => {
                assert_eq!(*status, 404);
                assert_eq!(body, r#"{"message":"not found"}"#);
            }
            other => panic!("expected client error, got {other:?}"),
        }
        assert!(!err.is_retryable());
    }

    #[test]
    fn internal_server_error_is_not_retryable_on_its_own() {
        let err = NovuError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_owned(), None);
        assert!(matches!(err, NovuError::Server { status: 500, .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn unfollowed_redirect_is_a_request_failure() {
        let err = NovuError::from_status(StatusCode::MULTIPLE_CHOICES, "moved".to_owned(), None);
        assert!(matches!(err, NovuError::Redirect { status: 300, .. }));
        assert_eq!(err.body(), Some("moved"));
    }

    #[test]
    fn display_includes_status_and_body() {
        let err = NovuError::from_status(StatusCode::BAD_REQUEST, "bad".to_owned(), None);
        assert_eq!(
            err.to_string(),
            "request was not successful, status code 400, bad"
        );
    }
}
