//! Error types.
//!
//! The classifier, predicates, iterator and clone/merge operations never
//! fail. [`Error`] only covers the fallible edges around them:
//!
//! - **Type mismatches** when extracting a Rust value with `TryFrom`
//! - **Serialization** of cyclic values, symbols and functions through serde
//!
//! ## Examples
//!
//! ```rust
//! use valuekit::{Error, Object, Value};
//!
//! let obj = Object::new();
//! obj.set("self", Value::from(obj.clone()));
//!
//! let err = serde_json::to_string(&Value::from(obj)).unwrap_err();
//! assert!(err.to_string().contains("circular"));
//! ```

use crate::types::{classify, TypeTag};
use crate::value::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A value of the wrong type was extracted.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: TypeTag },

    /// A cyclic structure was serialized.
    #[error("Converting circular structure")]
    Circular,

    /// The value has no serialized form.
    #[error("Cannot serialize a value of type {0}")]
    Unserializable(TypeTag),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error describing what was found.
    ///
    /// ```rust
    /// use valuekit::{Error, Value};
    ///
    /// let err = Error::type_mismatch("integer", &Value::from("7"));
    /// assert!(err.to_string().contains("expected integer, found string"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &Value) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: classify(found),
        }
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

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
