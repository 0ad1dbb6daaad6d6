//! Canonical type classification.
//!
//! [`classify`] maps every [`Value`] to exactly one [`TypeTag`]. Primitives
//! report their own category; everything else goes through a fixed lookup
//! table keyed by the value's class tag (the `X` in `"[object X]"`), and
//! class tags missing from the table fall back to [`TypeTag::Object`].
//!
//! ```rust
//! use valuekit::{classify, value, Object, TypeTag, Value};
//!
//! assert_eq!(classify(&Value::Null), TypeTag::Null);
//! assert_eq!(classify(&value!([1, 2])), TypeTag::Array);
//! assert_eq!(classify(&Value::Object(Object::new().tagged("Map"))), TypeTag::Object);
//! assert_eq!(TypeTag::BigInt.to_string(), "bigint");
//! ```

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of canonical type tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Null,
    Undefined,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Function,
    Date,
    RegExp,
    Symbol,
    BigInt,
    Error,
}

/// Class tags recognized for non-primitive values.
const CLASS_TABLE: [(&str, TypeTag); 11] = [
    ("String", TypeTag::String),
    ("Number", TypeTag::Number),
    ("Boolean", TypeTag::Boolean),
    ("Array", TypeTag::Array),
    ("Object", TypeTag::Object),
    ("Date", TypeTag::Date),
    ("RegExp", TypeTag::RegExp),
    ("Function", TypeTag::Function),
    ("Symbol", TypeTag::Symbol),
    ("BigInt", TypeTag::BigInt),
    ("Error", TypeTag::Error),
];

impl TypeTag {
    /// Returns the lowercase tag name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Undefined => "undefined",
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
            TypeTag::Function => "function",
            TypeTag::Date => "date",
            TypeTag::RegExp => "regexp",
            TypeTag::Symbol => "symbol",
            TypeTag::BigInt => "bigint",
            TypeTag::Error => "error",
        }
    }

    /// Looks a class tag up in the classification table.
    ///
    /// ```rust
    /// use valuekit::TypeTag;
    ///
    /// assert_eq!(TypeTag::from_class_tag("RegExp"), Some(TypeTag::RegExp));
    /// assert_eq!(TypeTag::from_class_tag("Map"), None);
    /// ```
    #[must_use]
    pub fn from_class_tag(tag: &str) -> Option<TypeTag> {
        CLASS_TABLE
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, type_tag)| *type_tag)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a value into its canonical [`TypeTag`].
///
/// Total and side-effect free. `Null` and `Undefined` are answered before any
/// other inspection.
#[must_use]
pub fn classify(value: &Value) -> TypeTag {
    match value {
        Value::Null => TypeTag::Null,
        Value::Undefined => TypeTag::Undefined,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Number(_) => TypeTag::Number,
        Value::String(_) => TypeTag::String,
        Value::Symbol(_) => TypeTag::Symbol,
        Value::BigInt(_) => TypeTag::BigInt,
        Value::Date(_)
        | Value::RegExp(_)
        | Value::Error(_)
        | Value::Function(_)
        | Value::Array(_)
        | Value::Object(_) => {
            TypeTag::from_class_tag(&value.class_tag()).unwrap_or(TypeTag::Object)
        }
    }
}
