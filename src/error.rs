//! Error types for SuperJSON parsing and emission.
//!
//! Every failure is reported synchronously to the caller of [`parse`](crate::parse),
//! [`deserialize`](crate::deserialize), [`stringify`](crate::stringify) or
//! [`serialize`](crate::serialize). The only lenient case is an annotation whose
//! path does not resolve, which is skipped rather than reported.
//!
//! ## Error Categories
//!
//! - **Invalid JSON**: the envelope text is malformed, or the payload is not an object
//! - **Invalid Meta**: the `json` key is missing, `meta` is structurally malformed,
//!   or a transform received input of the wrong shape
//! - **Unsupported Type**: strict big-integer mode found no arithmetic backend, or a
//!   backend was asked to stringify a value it does not own
//!
//! ## Examples
//!
//! ```rust
//! use serde_superjson::{parse, Error};
//!
//! let result = parse(r#"{"meta":{"v":1}}"#);
//! assert!(matches!(result, Err(Error::InvalidMeta(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while reconstructing or emitting envelopes.
///
/// Callers can match on the variant to decide whether to retry with a relaxed
/// [`Config`](crate::Config) (for example without strict big-integer mode) or to
/// treat the input as corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Envelope text is not valid JSON, or the decoded payload is not an object
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Missing `json` key, malformed `meta`, or a transform input of the wrong shape
    #[error("Invalid meta structure: {0}")]
    InvalidMeta(String),

    /// No suitable big-integer backend, or a value the active backend does not own
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid JSON error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_superjson::Error;
    ///
    /// let err = Error::invalid_json("Payload must be an object");
    /// assert_eq!(err.to_string(), "Invalid JSON: Payload must be an object");
    /// ```
    pub fn invalid_json<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidJson(msg.to_string())
    }

    /// Creates an invalid meta structure error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_superjson::Error;
    ///
    /// let err = Error::invalid_meta("Missing \"json\" key in payload");
    /// assert!(err.to_string().starts_with("Invalid meta structure"));
    /// ```
    pub fn invalid_meta<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidMeta(msg.to_string())
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type<T: fmt::Display>(msg: T) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidJson(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
