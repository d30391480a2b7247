//! Festival API error types

use std::fmt;

/// Errors that can occur talking to the festival API
#[derive(Debug)]
pub enum ApiError {
    /// Client could not be built or the base URL is unusable
    Client(String),
    /// Request never completed (connection refused, timeout, ...)
    Network(String),
    /// Server answered with a non-success status
    Status { status: u16, message: String },
    /// Response body was not the JSON we expected
    Decode(String),
    /// Server understood the request but refused it (validation failure)
    Rejected { message: String },
}

impl ApiError {
    /// Message suitable for a user-facing banner
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Rejected { message } => message,
            ApiError::Status { message, .. } if !message.is_empty() => message,
            _ => "Request failed",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client(msg) => write!(f, "HTTP client error: {}", msg),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status { status, message } => {
                if message.is_empty() {
                    write!(f, "API error ({})", status)
                } else {
                    write!(f, "API error ({}): {}", status, message)
                }
            }
            Self::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            Self::Rejected { message } => write!(f, "Rejected: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::Status {
                status: status.as_u16(),
                message: String::new(),
            }
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "API error (500)");

        let err = ApiError::Rejected {
            message: "Mobile number is invalid".into(),
        };
        assert_eq!(err.to_string(), "Rejected: Mobile number is invalid");
        assert_eq!(err.user_message(), "Mobile number is invalid");
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message(), "Request failed");
    }
}
