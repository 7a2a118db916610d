use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - session expired or invalid")]
    Unauthorized { body: String },

    #[error("Access denied: {body}")]
    AccessDenied { body: String },

    #[error("Resource not found: {body}")]
    NotFound { body: String },

    #[error("Rate limited by server")]
    RateLimited { body: String },

    #[error("Server error {status}: {body}")]
    ServerError { status: StatusCode, body: String },

    #[error("Request failed with status {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session storage error: {0}")]
    Session(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized { body },
            403 => ApiError::AccessDenied { body },
            404 => ApiError::NotFound { body },
            429 => ApiError::RateLimited { body },
            500..=599 => ApiError::ServerError { status, body },
            _ => ApiError::Http { status, body },
        }
    }

    /// The HTTP status the backend answered with, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::AccessDenied { .. } => Some(StatusCode::FORBIDDEN),
            ApiError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            ApiError::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            ApiError::ServerError { status, .. } | ApiError::Http { status, .. } => Some(*status),
            ApiError::NetworkError(e) => e.status(),
            _ => None,
        }
    }

    /// Response body returned alongside an error status, truncated.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { body }
            | ApiError::AccessDenied { body }
            | ApiError::NotFound { body }
            | ApiError::RateLimited { body }
            | ApiError::ServerError { body, .. }
            | ApiError::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
