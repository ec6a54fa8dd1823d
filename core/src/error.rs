//! Error types for the clothing-item client.
//!
//! # Design
//! Backend failures (non-2xx) and transport failures (no response at all)
//! are kept apart as variants but share one category for the pages: both are
//! request errors that end in an error notification. A missing record is not
//! an error; `parse_get_item` returns `Ok(None)` for it.
//!
//! `ValidationError` is produced locally before anything reaches the network
//! and carries exactly one human-readable cause.

use thiserror::Error;

/// Errors returned by `ClothingClient` parse methods and by transports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}{}{}", reason_suffix(.status_text), body_suffix(.body))]
    Request {
        status: u16,
        status_text: String,
        body: String,
    },

    /// No response was received.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A 2xx response had no body where a record was required.
    #[error("HTTP {0} response carried no body")]
    MissingBody(u16),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status when the backend answered, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } | ApiError::MissingBody(status) => Some(*status),
            _ => None,
        }
    }
}

fn reason_suffix(status_text: &str) -> String {
    let status_text = status_text.trim();
    if status_text.is_empty() {
        String::new()
    } else {
        format!(" - {status_text}")
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// The first validation rule a candidate broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must have at least 2 characters.")]
    NameTooShort,

    #[error("Description is too short.")]
    DescriptionTooShort,

    #[error("Select a size.")]
    MissingSize,

    #[error("Enter a valid price.")]
    InvalidPrice,

    #[error("Invalid image URL.")]
    InvalidImageUrl,
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid API base URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("resource name must not be empty")]
    EmptyResource,

    #[error("unknown currency {0:?} (expected BRL or USD)")]
    UnknownCurrency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_includes_body_when_present() {
        let err = ApiError::Request {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500 - Internal Server Error: boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn request_error_omits_empty_body() {
        let err = ApiError::Request {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 503 - Service Unavailable");
    }

    #[test]
    fn request_error_without_reason_has_no_dangling_separator() {
        let err = ApiError::Request {
            status: 599,
            status_text: " ".to_string(),
            body: "teapot".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 599: teapot");
        let bare = ApiError::Request {
            status: 599,
            status_text: String::new(),
            body: String::new(),
        };
        assert_eq!(bare.to_string(), "HTTP 599");
    }

    #[test]
    fn transport_error_has_no_status() {
        assert_eq!(ApiError::Transport("refused".into()).status(), None);
    }
}
