/// Error types for the Pardot SDK.
///
/// Client-side validation failures (unknown resource, unknown operation,
/// argument shape) are kept apart from transport failures and from the
/// structured `stat="fail"` responses the API itself returns.
use thiserror::Error;

/// Pardot error code signalling an invalid or expired `api_key`.
pub const TOKEN_EXPIRED_CODE: &str = "1";

/// The primary error type for the Pardot SDK.
#[derive(Error, Debug)]
pub enum PardotError {
    // Registry / dispatch
    #[error("Resource \"{0}\" not supported")]
    UnsupportedResource(String),

    #[error("Operation \"{operation}\" not supported for \"{resource}\"")]
    UnsupportedOperation { resource: String, operation: String },

    #[error(
        "Arguments ({arguments}) do not match identifiers ({identifiers}) for operation {operation} on {resource}"
    )]
    ArgumentMismatch {
        resource: String,
        operation: String,
        arguments: usize,
        identifiers: usize,
    },

    // API
    #[error("Pardot API call failed with Code {code}: \"{message}\" for request: {request}")]
    Api {
        code: String,
        message: String,
        request: String,
    },

    #[error("Failed to decode JSON response from API request {request} (status code {status}) - error was: {message}")]
    MalformedResponse {
        status: u16,
        request: String,
        message: String,
    },

    // Transport errors
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

impl PardotError {
    /// Returns the Pardot error code if this is an API error.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            PardotError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Returns true if the API rejected the cached `api_key`.
    pub fn is_token_expired(&self) -> bool {
        self.error_code() == Some(TOKEN_EXPIRED_CODE)
    }

    /// Returns true for connection-level failures, the only kind retried with backoff.
    pub fn is_transport(&self) -> bool {
        matches!(self, PardotError::HttpError(_))
    }
}

impl From<reqwest::Error> for PardotError {
    fn from(err: reqwest::Error) -> Self {
        PardotError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for PardotError {
    fn from(err: serde_json::Error) -> Self {
        PardotError::JsonError(err.to_string())
    }
}
