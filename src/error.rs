// HTTP client error types
use thiserror::Error;

/// Failure of a single backend request, as seen by the caller of a service client.
#[derive(Debug, Error)]
pub enum ClientError {
    // Server unreachable (connection refused, DNS, network down)
    #[error("cannot connect to server at {url}")]
    Connectivity { url: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    // 401 from any guarded request. The session has already been invalidated.
    #[error("session is no longer authorized")]
    Unauthorized,

    // Any other non-2xx response
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(String),
}

impl ClientError {
    /// Map a reqwest failure onto the taxonomy. `url` is the request target, kept for messaging.
    pub fn from_reqwest(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            ClientError::Timeout { url: url.to_string() }
        } else if err.is_connect() {
            ClientError::Connectivity { url: url.to_string() }
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }

    /// HTTP status, when the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable code for JSON output and client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Connectivity { .. } => "CONNECTIVITY",
            ClientError::Timeout { .. } => "TIMEOUT",
            ClientError::Unauthorized => "UNAUTHORIZED",
            ClientError::Status { .. } => "HTTP_STATUS",
            ClientError::Decode(_) => "DECODE",
            ClientError::InvalidUrl(_) => "INVALID_URL",
            ClientError::Transport(_) => "TRANSPORT",
        }
    }

    /// True when no server could be reached, as opposed to a server saying no.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            ClientError::Connectivity { .. } | ClientError::Timeout { .. }
        )
    }

    /// True when the server rejected the request as a client error (4xx).
    pub fn is_rejection(&self) -> bool {
        matches!(self.status_code(), Some(status) if (400..500).contains(&status))
    }

    /// Message suitable for an alert shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Connectivity { url } | ClientError::Timeout { url } => format!(
                "Cannot connect to server. Please ensure the backend is running ({})",
                url
            ),
            ClientError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            ClientError::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => "The request failed. Please try again.".to_string(),
        }
    }
}
