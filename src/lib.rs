//! # valuekit
//!
//! Runtime type introspection and structural copying for dynamic values.
//!
//! ## What is in the box?
//!
//! - **Classification**: [`classify`] maps any [`Value`] to one [`TypeTag`]
//! - **Predicates**: [`is_plain_object`], [`is_array_like`], [`is_empty_object`],
//!   [`is_numeric`], [`is_callable`]
//! - **Uniform iteration**: [`each`] walks arrays, array-likes and keyed objects
//!   with early exit
//! - **Merge**: [`shallow_merge`] and [`deep_merge`] of plain objects
//! - **Clone**: [`shallow_clone`] and [`deep_clone`], safe on cyclic input
//!
//! ## Quick Start
//!
//! ```rust
//! use valuekit::{classify, deep_clone, deep_merge, value, Object, TypeTag, Value};
//!
//! let defaults = value!({
//!     "server": { "host": "localhost", "port": 8080 },
//!     "debug": false
//! });
//! let overrides = value!({ "server": { "port": 9090 } });
//!
//! let config = deep_merge(&deep_clone(&defaults), &overrides);
//! assert_eq!(config.get("server").get("port").as_i64(), Some(9090));
//! assert_eq!(config.get("server").get("host").as_str(), Some("localhost"));
//! assert_eq!(defaults.get("server").get("port").as_i64(), Some(8080));
//!
//! assert_eq!(classify(&config), TypeTag::Object);
//! ```
//!
//! ### Cyclic values
//!
//! ```rust
//! use valuekit::{deep_clone, Object, Value};
//!
//! let node = Object::new();
//! node.set("self", Value::from(node.clone()));
//! let node = Value::from(node);
//!
//! let copy = deep_clone(&node);
//! assert!(copy.get("self").same_value(&copy));
//! ```
//!
//! ## Guarantees
//!
//! - Classification, predicates, iteration, merge and clone never fail and
//!   never panic on well-formed values; unsupported kinds degrade to being
//!   returned as is
//! - Each deep call owns its [`VisitedSet`]; nothing is shared between calls
//! - Recursion depth equals input nesting depth; see
//!   [`TraversalOptions::with_max_depth`]
//! - No `unsafe` code
//!
//! ## Logging
//!
//! Events are emitted through [`tracing`]: cycle hits at `TRACE`, objects
//! returned uncloned at `DEBUG`, depth truncation at `WARN`. Install a
//! subscriber to see them.

pub mod clone;
pub mod error;
pub mod guard;
pub mod iter;
pub mod macros;
pub mod map;
pub mod merge;
pub mod options;
pub mod predicates;
pub mod types;
pub mod value;

pub use clone::{deep_clone, deep_clone_in, deep_clone_with, shallow_clone};
pub use error::{Error, Result};
pub use guard::VisitedSet;
pub use iter::{each, each_with, Flow};
pub use map::{PropertyKey, PropertyMap};
pub use merge::{deep_merge, deep_merge_in, deep_merge_with, shallow_merge};
pub use options::TraversalOptions;
pub use predicates::{
    is_array_like, is_callable, is_empty_object, is_numeric, is_plain_object, to_number,
};
pub use types::{classify, TypeTag};
pub use value::{
    Array, ErrorKind, ErrorObject, Function, Number, Object, Prototype, RegExp, Symbol, Value,
};
