//! Error types for bkt-core
//!
//! Capability errors are carried through the bucket handle untouched. The only
//! distinction this crate ever draws on them is "HTTP 404" vs "anything else".

use thiserror::Error;

/// Result type alias for bkt-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bkt-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The service answered the request with a failure status
    #[error("Request failed with status {status}: {message}")]
    RequestFailure {
        /// HTTP status code of the response
        status: u16,
        /// Service error code, e.g. `NoSuchKey`
        code: Option<String>,
        /// Service error message
        message: String,
    },

    /// The request never produced an HTTP response
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A paged operation observed its cancellation token
    #[error("Operation cancelled")]
    Cancelled,

    /// Object content could not be prepared for upload
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid path format
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Alias not found
    #[error("Alias not found: {0}")]
    AliasNotFound(String),

    /// Alias already exists
    #[error("Alias already exists: {0}")]
    AliasExists(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Build a request failure from its parts
    pub fn request_failure(
        status: u16,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::RequestFailure {
            status,
            code,
            message: message.into(),
        }
    }

    /// HTTP status of the failed request, if the service answered at all
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Error::RequestFailure { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the service reported the resource as missing (HTTP 404)
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status_code(), Some(404))
    }

    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_) | Error::Config(_) | Error::InvalidContent(_) => 2,
            Error::RequestFailure { status, .. } => match *status {
                404 => 5,
                401 | 403 => 4,
                409 | 412 => 6,
                _ => 3,
            },
            Error::Transport(_) => 3,
            Error::AliasNotFound(_) => 5,
            Error::AliasExists(_) => 6,
            Error::Cancelled => 130,
            _ => 1,
        }
    }
}
