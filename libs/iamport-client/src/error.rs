use iamport_http::HttpError;
use thiserror::Error;

/// Errors raised while building [`ClientOptions`](crate::ClientOptions).
///
/// Variants name the offending field but never carry secret values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required field is missing or blank.
    #[error("configuration value '{field}' must not be empty")]
    EmptyArgument { field: &'static str },

    /// The base URL could not be parsed as an absolute URL.
    #[error("invalid URL format '{url}': {reason}")]
    InvalidUrlFormat { url: String, reason: String },

    /// The value parses but is not acceptable (e.g. wrong URL scheme).
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// The configuration source could not be read or extracted.
    #[error("failed to load configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// Errors returned by the client core and the resource APIs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IamportError {
    /// A caller-supplied argument is unusable; raised before any I/O.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Options validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Base URL and path did not compose into a valid URL.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The client was disposed before the call.
    #[error("operation is not valid on a disposed client")]
    Disposed,

    /// The gateway answered with a non-zero envelope code.
    #[error(
        "gateway responded with code {code}: {}",
        .message.as_deref().unwrap_or("<no message>")
    )]
    Gateway { code: i64, message: Option<String> },

    /// Non-2xx status whose body is not a gateway envelope.
    #[error("HTTP {status}: {body_preview}")]
    HttpStatus {
        status: http::StatusCode,
        body_preview: String,
    },

    /// The envelope decoded but lacks data the caller requires.
    #[error("invalid gateway response: {0}")]
    InvalidResponse(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The transport failed before a response was received.
    #[error(transparent)]
    Transport(#[from] HttpError),
}

impl IamportError {
    /// Gateway code for [`IamportError::Gateway`], `None` otherwise.
    #[must_use]
    pub fn gateway_code(&self) -> Option<i64> {
        match self {
            IamportError::Gateway { code, .. } => Some(*code),
            _ => None,
        }
    }
}
