use serde_json::Value;
use thiserror::Error;

/// Categorizes errors so callers can build their own retry policy.
/// The client itself never retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Authentication/authorization issues - should not retry
    Auth,
    /// Invalid request - should not retry
    InvalidRequest,
    /// Server-side failure - may retry
    Server,
    /// Network/connection issues - may retry
    Network,
    /// Unknown/other errors
    Other,
}

#[derive(Debug, Error)]
pub enum JackalPinError {
    /// Errors from the HTTP client (DNS, connect, timeout); no HTTP
    /// status code exists for these.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    /// An authenticated operation was invoked with no API key set.
    /// Raised before any network call is made.
    #[error("API key is required for authentication")]
    MissingApiKey,

    /// The server rejected the credential (HTTP 401)
    #[error("unauthorized: {message}")]
    Unauthorized {
        message: String,
        body: Option<Value>,
    },

    /// The requested resource does not exist (HTTP 404)
    #[error("not found: {message}")]
    NotFound {
        message: String,
        body: Option<Value>,
    },

    /// The request was malformed (HTTP 400)
    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        body: Option<Value>,
    },

    /// The server failed (HTTP 5xx)
    #[error("server error {status}: {message}")]
    Server {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    /// Any other non-2xx response
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    /// A 2xx response whose body could not be decoded
    #[error("unexpected response from API: {0}")]
    UnexpectedResponse(String),
}

impl JackalPinError {
    /// The HTTP status code associated with this error, when one exists.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The decoded JSON error body, when the server returned one.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Unauthorized { body, .. }
            | Self::NotFound { body, .. }
            | Self::BadRequest { body, .. }
            | Self::Server { body, .. }
            | Self::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Returns the error kind for categorizing errors in retry logic
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiKey | Self::Unauthorized { .. } => ErrorKind::Auth,
            Self::NotFound { .. } | Self::BadRequest { .. } => ErrorKind::InvalidRequest,
            Self::Server { .. } => ErrorKind::Server,
            Self::ReqwestError(e) => {
                if e.is_timeout() || e.is_connect() || e.is_request() {
                    ErrorKind::Network
                } else {
                    ErrorKind::Other
                }
            }
            Self::Api { .. } | Self::SerdeError(_) | Self::UnexpectedResponse(_) => {
                ErrorKind::Other
            }
        }
    }

    /// Returns true if a caller-side retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Server | ErrorKind::Network)
    }
}

/// Parse an error response from the JackalPin API.
/// Handles both JSON bodies (message extracted from the `message` field)
/// and plain text bodies.
pub fn parse_error_response(status: reqwest::StatusCode, bytes: bytes::Bytes) -> JackalPinError {
    let body: Option<Value> = serde_json::from_slice(&bytes).ok();

    let message = body
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(&bytes);
            let text = text.trim();
            if text.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                text.to_string()
            }
        });

    match status.as_u16() {
        401 => JackalPinError::Unauthorized { message, body },
        404 => JackalPinError::NotFound { message, body },
        400 => JackalPinError::BadRequest { message, body },
        status @ 500..=599 => JackalPinError::Server {
            status,
            message,
            body,
        },
        status => JackalPinError::Api {
            status,
            message,
            body,
        },
    }
}
