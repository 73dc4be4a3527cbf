//! Error types for graph serialization and resurrection.
//!
//! Every error is fatal to the call that raised it: the engine never returns
//! a partially encoded payload or a partially resurrected graph.
//!
//! ## Error Categories
//!
//! - **Type errors**: a type name is unknown, anonymous, or bound to a
//!   different class than the one registered under that name
//! - **Value errors**: a value has no encoding (callables, reserved keys)
//! - **Payload errors**: the text is not JSON, or the JSON does not have the
//!   table/reference/builder shape
//! - **I/O errors**: reading or writing a payload failed
//!
//! ## Examples
//!
//! ```rust
//! use serde_resurrect::{from_str, Error};
//!
//! let result = from_str("[{\"next\":{\"#id\":7}}]");
//! assert!(matches!(result, Err(Error::MalformedPayload(_))));
//! ```

use serde_json::error::Category;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by [`Engine`](crate::Engine) calls.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A builder routine or type name is not in the namespace
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// An object's class is not the class registered under its name
    #[error("Constructor mismatch: object of type {name} is not bound to the registered {name}")]
    IdentityMismatch { name: String },

    /// A value that has no encoding
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// An object's class has an empty name and cannot be revived
    #[error("Anonymous type cannot be revived")]
    AnonymousType,

    /// The decoded JSON is not a table, reference or builder
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The payload is not valid JSON
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Pattern source or flags rejected
    #[error("Invalid pattern /{pattern}/: {msg}")]
    InvalidPattern { pattern: String, msg: String },

    /// Engine configuration rejected
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Method dispatch on an object whose class has no such method
    #[error("Type {type_name} has no method {method}")]
    MissingMethod { type_name: String, method: String },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unknown type error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_resurrect::Error;
    ///
    /// let err = Error::unknown_type("Greeter");
    /// assert!(err.to_string().contains("Greeter"));
    /// ```
    pub fn unknown_type(name: &str) -> Self {
        Error::UnknownType(name.to_string())
    }

    /// Creates a constructor mismatch error for the type `name`.
    pub fn identity_mismatch(name: &str) -> Self {
        Error::IdentityMismatch {
            name: name.to_string(),
        }
    }

    /// Creates an unsupported value error.
    pub fn unsupported_value(msg: &str) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates a malformed payload error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_resurrect::Error;
    ///
    /// let err = Error::malformed("table is empty");
    /// assert!(err.to_string().contains("table is empty"));
    /// ```
    pub fn malformed(msg: &str) -> Self {
        Error::MalformedPayload(msg.to_string())
    }

    pub fn invalid_pattern(pattern: &str, msg: &str) -> Self {
        Error::InvalidPattern {
            pattern: pattern.to_string(),
            msg: msg.to_string(),
        }
    }

    pub fn missing_method(type_name: &str, method: &str) -> Self {
        Error::MissingMethod {
            type_name: type_name.to_string(),
            method: method.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Io => Error::Io(err.to_string()),
            Category::Syntax | Category::Eof => Error::Syntax {
                line: err.line(),
                col: err.column(),
                msg: err.to_string(),
            },
            Category::Data => Error::Custom(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
