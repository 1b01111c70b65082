//! Error types for bodymap
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::ContentFormat;
use thiserror::Error;

/// The main error type for bodymap
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Decode Errors
    // ============================================================================
    /// Body is not well-formed for its format
    #[error("Failed to parse {format}{}: {message}", position_suffix(.position))]
    Parse {
        /// Format the body was parsed as
        format: ContentFormat,
        /// Parser message
        message: String,
        /// Byte offset or line/column, when known
        position: Option<String>,
    },

    /// Required field absent or `null`
    #[error("Missing required field: {field}")]
    MissingField {
        /// Dotted path of the field, e.g. `children[1].name`
        field: String,
    },

    /// Field present but not convertible to its declared type
    #[error("Cannot coerce field '{field}' to {expected}: {text:?}")]
    TypeCoercion {
        /// Dotted path of the field
        field: String,
        /// Declared type
        expected: String,
        /// Offending raw text, or a placeholder for non-scalars
        text: String,
    },

    // ============================================================================
    // Shape / Configuration Errors
    // ============================================================================
    /// Shape declaration is inconsistent
    #[error("Invalid shape '{shape}': {message}")]
    InvalidShape {
        /// Shape name
        shape: String,
        /// What is wrong
        message: String,
    },

    /// Bad configuration or arguments
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// Shape file is not valid YAML
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Request exceeded the configured timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Neither the response nor the caller names a usable format
    #[error("Cannot determine content format from '{content_type}'")]
    UnknownContentType {
        /// `Content-Type` header value, possibly empty
        content_type: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input or shape file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path as given
        path: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Anything else, usually with added context
    #[error("{0}")]
    Other(String),
}

fn position_suffix(position: &Option<String>) -> String {
    match position {
        Some(pos) => format!(" at {pos}"),
        None => String::new(),
    }
}

impl Error {
    /// Create a parse error
    pub fn parse(
        format: ContentFormat,
        message: impl Into<String>,
        position: Option<String>,
    ) -> Self {
        Self::Parse {
            format,
            message: message.into(),
            position,
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a type coercion error
    pub fn type_coercion(
        field: impl Into<String>,
        expected: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::TypeCoercion {
            field: field.into(),
            expected: expected.into(),
            text: text.into(),
        }
    }

    /// Create an invalid shape error
    pub fn invalid_shape(shape: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidShape {
            shape: shape.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Whether this error came out of the decoding contract
    /// (parse, missing field, or coercion failure)
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::Parse { .. } | Error::MissingField { .. } | Error::TypeCoercion { .. }
        )
    }

    /// Check if this error is retryable.
    ///
    /// Nothing in this crate retries; this is a hint for callers that do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for bodymap
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
