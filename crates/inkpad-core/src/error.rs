//! Error handling for inkpad
//!
//! Interactive editing never fails: gestures that cannot apply are ignored
//! with a diagnostic log line. Errors only exist at the host-facing
//! boundaries:
//! - Markup errors (loading a saved scene)
//! - Configuration errors (editor settings)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Markup error type
///
/// Represents failures while reading a scene back from its markup form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkupError {
    /// The document is not well-formed XML
    #[error("Malformed markup: {message}")]
    Malformed {
        /// The parser's description of the problem.
        message: String,
    },

    /// The root element is not an `<svg>` element
    #[error("Expected <svg> root element, found <{found}>")]
    UnexpectedRoot {
        /// The tag name that was found instead.
        found: String,
    },

    /// A required attribute is missing from an element
    #[error("Element <{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        /// The element tag name.
        element: String,
        /// The attribute name.
        attribute: String,
    },

    /// An attribute holds a value that cannot be interpreted
    #[error("Invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute {
        /// The attribute name.
        attribute: String,
        /// The offending value.
        value: String,
    },

    /// Path data could not be parsed
    #[error("Invalid path data at token {position}: {reason}")]
    InvalidPathData {
        /// Token index where parsing stopped.
        position: usize,
        /// Why the token was rejected.
        reason: String,
    },
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration text could not be parsed
    #[error("Failed to parse configuration: {message}")]
    Parse {
        /// The parser's description of the problem.
        message: String,
    },

    /// A setting is out of range
    #[error("Invalid setting '{field}': {reason}")]
    Invalid {
        /// The offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
        }
    }
}

/// Main error type for inkpad
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Markup error
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for inkpad operations
pub type Result<T> = std::result::Result<T, Error>;
