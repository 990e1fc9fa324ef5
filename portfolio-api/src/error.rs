// portfolio-api/src/error.rs
use crate::types::ResponseBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained (DNS, connection, TLS, body read)
    #[error("network error: {message}")]
    Network { message: String },

    /// The server answered with a non-2xx status
    #[error("{status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        body: ResponseBody,
    },

    /// A body labelled as JSON, or a body decoded into a typed value, did not parse
    #[error("invalid response body: {message}")]
    Decode {
        status: Option<u16>,
        message: String,
    },

    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the response, absent for network and serialization failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Decode { status, .. } => *status,
            ApiError::Network { .. } | ApiError::Serialization(_) => None,
        }
    }

    /// Parsed or raw body of an HTTP failure
    pub fn body(&self) -> Option<&ResponseBody> {
        match self {
            ApiError::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Server-provided `message` suitable for showing to a user
    pub fn user_message(&self) -> Option<&str> {
        self.body().and_then(ResponseBody::message)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

pub mod error_messages {
    /// Fallback banner text for a failed request
    pub const REQUEST_FAILED: &str = "An error occurred while communicating with the server.";
    /// Fallback banner text for a failed upload
    pub const UPLOAD_FAILED: &str = "An error occurred while uploading the file.";
}
