//! Shallow and deep structural copies.
//!
//! [`shallow_clone`] copies one level: a fresh array or plain object whose
//! slots hold the same references as the original. [`deep_clone`] allocates
//! every nested array and plain object anew and copies leaves by the
//! shallow rules.
//!
//! | kind                          | copy                                          |
//! |-------------------------------|-----------------------------------------------|
//! | undefined, null, primitives   | the value itself                              |
//! | date, regexp                  | a new instance with the same content          |
//! | symbol, bigint                | the same symbol / an equal bigint             |
//! | error                         | a new error of the same kind and message      |
//! | function                      | the same function                             |
//! | array, plain object           | a new container of the same kind              |
//! | class instance, exotic object | the value itself, uncopied                    |
//!
//! ```rust
//! use valuekit::{deep_clone, shallow_clone, value, Value};
//!
//! let original = value!({ "a": { "b": 1 } });
//!
//! let shallow = shallow_clone(&original);
//! assert!(shallow.get("a").same_value(&original.get("a")));
//!
//! let deep = deep_clone(&original);
//! deep.get("a").set("b", Value::from(2));
//! assert_eq!(original.get("a").get("b").as_i64(), Some(1));
//! ```
//!
//! Recursion depth follows the input's nesting, so a pathologically deep
//! (non-cyclic) structure can exhaust the stack. Bound it with
//! [`TraversalOptions::with_max_depth`] if inputs are untrusted.

use crate::guard::VisitedSet;
use crate::iter::{each, each_with};
use crate::options::TraversalOptions;
use crate::predicates::is_plain_object;
use crate::types::{classify, TypeTag};
use crate::value::{Array, ErrorObject, RegExp, Value};
use tracing::{debug, trace, warn};

/// Arrays and plain objects: the only kinds that are recursed into.
fn is_composite(value: &Value) -> bool {
    is_plain_object(value) || classify(value) == TypeTag::Array
}

/// A new, empty container of the same concrete kind as `value`.
fn empty_like(value: &Value) -> Value {
    match value {
        Value::Object(obj) => Value::Object(obj.empty_like()),
        _ => Value::Array(Array::new()),
    }
}

/// Copies `value` one level deep.
///
/// Symbols and bigints have no wrapper object in this model: a symbol comes
/// back as the same symbol and a bigint as an equal bigint.
#[must_use]
pub fn shallow_clone(value: &Value) -> Value {
    match value {
        Value::Date(date) => Value::Date(*date),
        Value::RegExp(re) => Value::RegExp(RegExp::new(re.source(), re.flags())),
        Value::Error(err) => Value::Error(ErrorObject::new(err.kind().clone(), err.message())),
        Value::Array(_) | Value::Object(_) if is_composite(value) => {
            let copy = empty_like(value);
            each(value, |key, element| {
                copy.set(key, element);
            });
            copy
        }
        Value::Object(obj) => {
            debug!(
                class_tag = %obj.class_tag(),
                prototype = ?obj.prototype(),
                "no copy rule for object, returning it uncloned"
            );
            value.clone()
        }
        _ => value.clone(),
    }
}

/// Copies `value` recursively.
///
/// A composite met again during the same traversal maps to the copy already
/// made for it, so cycles and shared references in the input come out as
/// cycles and shared references in the copy.
#[must_use]
pub fn deep_clone(value: &Value) -> Value {
    deep_clone_with(value, &TraversalOptions::default())
}

/// [`deep_clone`] with explicit options.
#[must_use]
pub fn deep_clone_with(value: &Value, options: &TraversalOptions) -> Value {
    let mut visited = VisitedSet::new();
    Cloner {
        options,
        visited: &mut visited,
    }
    .copy(value, 0)
}

/// [`deep_clone`] sharing a caller-owned [`VisitedSet`].
///
/// Composites already recorded in `visited` are replaced by whatever was
/// recorded for them.
#[must_use]
pub fn deep_clone_in(value: &Value, visited: &mut VisitedSet) -> Value {
    Cloner {
        options: &TraversalOptions::default(),
        visited,
    }
    .copy(value, 0)
}

struct Cloner<'a> {
    options: &'a TraversalOptions,
    visited: &'a mut VisitedSet,
}

impl Cloner<'_> {
    fn copy(&mut self, value: &Value, depth: usize) -> Value {
        if !is_composite(value) {
            return shallow_clone(value);
        }
        if let Some(copy) = self.visited.get(value) {
            trace!(depth, "composite already cloned in this traversal, reusing its copy");
            return copy.clone();
        }
        if self.options.depth_exceeded(depth) {
            warn!(depth, "max depth reached, cloning remaining levels shallowly");
            return shallow_clone(value);
        }

        // Registered before descending so self-references resolve to it.
        let result = empty_like(value);
        self.visited.insert(value, result.clone());

        let options = self.options;
        each_with(value, options, |key, child| {
            let copy = self.copy(&child, depth + 1);
            result.set(key, copy);
        });
        result
    }
}
