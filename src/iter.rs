//! Uniform iteration over arrays, array-likes and keyed objects.
//!
//! [`each`] walks an array-like value by index and anything else by its own
//! keys. The callback's return value decides whether to keep going; see
//! [`Flow`].
//!
//! ```rust
//! use valuekit::{each, value};
//!
//! let numbers = value!([1, 2, 3, 4]);
//! let mut seen = Vec::new();
//! each(&numbers, |_, v| {
//!     seen.push(v.as_i64().unwrap_or_default());
//!     v.as_i64() != Some(3)
//! });
//! assert_eq!(seen, vec![1, 2, 3]);
//! ```

use crate::map::PropertyKey;
use crate::options::TraversalOptions;
use crate::predicates::{array_like_length, is_array_like};
use crate::value::Value;
use std::ops::ControlFlow;

/// The result of an [`each`] callback.
///
/// Only an explicit `false` stops iteration: `()` never stops, `bool` stops on
/// `false`, [`Value`] stops only on `Value::Bool(false)` (so `Null`, `0` and
/// `""` keep going), and [`ControlFlow`] stops on `Break`.
pub trait Flow {
    fn is_break(&self) -> bool;
}

impl Flow for () {
    fn is_break(&self) -> bool {
        false
    }
}

impl Flow for bool {
    fn is_break(&self) -> bool {
        !*self
    }
}

impl Flow for Value {
    fn is_break(&self) -> bool {
        matches!(self, Value::Bool(false))
    }
}

impl<B, C> Flow for ControlFlow<B, C> {
    fn is_break(&self) -> bool {
        matches!(self, ControlFlow::Break(_))
    }
}

/// Calls `callback(key, value)` for every slot of `container` and returns
/// `container`.
///
/// Array-like values are visited at indices `0..length` in ascending order,
/// with `length` read once up front and each element read when its turn
/// comes. Other values are visited by own key in enumeration order, keys
/// being snapshotted first. `each` itself never mutates; the callback may.
pub fn each<F, R>(container: &Value, callback: F) -> &Value
where
    F: FnMut(PropertyKey, Value) -> R,
    R: Flow,
{
    each_with(container, &TraversalOptions::default(), callback)
}

/// [`each`] with explicit options.
pub fn each_with<'a, F, R>(
    container: &'a Value,
    options: &TraversalOptions,
    mut callback: F,
) -> &'a Value
where
    F: FnMut(PropertyKey, Value) -> R,
    R: Flow,
{
    if is_array_like(container) {
        let length = array_like_length(container);
        for index in 0..length {
            let element = container.get(index);
            if callback(PropertyKey::Index(index), element).is_break() {
                break;
            }
        }
    } else {
        for key in container.own_keys() {
            if key.is_symbol() && !options.include_symbol_keys {
                continue;
            }
            let value = container.get(key.clone());
            if callback(key, value).is_break() {
                break;
            }
        }
    }
    container
}
