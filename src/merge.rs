//! Shallow and deep merge of plain objects.
//!
//! Precedence, for `merge(target, source)`:
//!
//! | target        | source        | result                         |
//! |---------------|---------------|--------------------------------|
//! | not plain     | anything      | `source`                       |
//! | plain         | not plain     | `target`                       |
//! | plain         | plain         | `target`, updated from `source` |
//!
//! A plain-object target is updated in place and returned, so callers cannot
//! assume a fresh value.
//!
//! ```rust
//! use valuekit::{deep_merge, shallow_merge, value};
//!
//! let merged = deep_merge(&value!({ "a": { "x": 1 } }), &value!({ "a": { "y": 2 } }));
//! assert_eq!(merged, value!({ "a": { "x": 1, "y": 2 } }));
//!
//! let replaced = shallow_merge(&value!({ "a": { "x": 1 } }), &value!({ "a": { "y": 2 } }));
//! assert_eq!(replaced, value!({ "a": { "y": 2 } }));
//! ```

use crate::guard::VisitedSet;
use crate::iter::{each, each_with};
use crate::options::TraversalOptions;
use crate::predicates::is_plain_object;
use crate::value::Value;
use tracing::{trace, warn};

/// Copies the own properties of `source` onto `target`, one level deep.
#[must_use = "the merge result may be `source` rather than the updated target"]
pub fn shallow_merge(target: &Value, source: &Value) -> Value {
    if !is_plain_object(target) {
        return source.clone();
    }
    if !is_plain_object(source) {
        return target.clone();
    }
    each(source, |key, value| {
        target.set(key, value);
    });
    target.clone()
}

/// Recursively merges `source` into `target`.
///
/// Nested plain objects on both sides are merged rather than replaced. A
/// source composite met a second time in the same traversal is returned as
/// is, which stops recursion on cyclic sources.
#[must_use = "the merge result may be `source` rather than the updated target"]
pub fn deep_merge(target: &Value, source: &Value) -> Value {
    deep_merge_with(target, source, &TraversalOptions::default())
}

/// [`deep_merge`] with explicit options.
#[must_use = "the merge result may be `source` rather than the updated target"]
pub fn deep_merge_with(target: &Value, source: &Value, options: &TraversalOptions) -> Value {
    let mut visited = VisitedSet::new();
    Merger {
        options,
        visited: &mut visited,
    }
    .merge(target, source, 0)
}

/// [`deep_merge`] sharing a caller-owned [`VisitedSet`].
#[must_use = "the merge result may be `source` rather than the updated target"]
pub fn deep_merge_in(target: &Value, source: &Value, visited: &mut VisitedSet) -> Value {
    Merger {
        options: &TraversalOptions::default(),
        visited,
    }
    .merge(target, source, 0)
}

struct Merger<'a> {
    options: &'a TraversalOptions,
    visited: &'a mut VisitedSet,
}

impl Merger<'_> {
    fn merge(&mut self, target: &Value, source: &Value, depth: usize) -> Value {
        // The guard is keyed on the source side only.
        if self.visited.contains(source) {
            trace!(depth, "source already merged in this traversal, returning it as is");
            return source.clone();
        }
        self.visited.insert(source, source.clone());

        if !is_plain_object(target) {
            return source.clone();
        }
        if !is_plain_object(source) {
            return target.clone();
        }
        if self.options.depth_exceeded(depth) {
            warn!(depth, "max depth reached, merging remaining levels shallowly");
            return shallow_merge(target, source);
        }

        let options = self.options;
        each_with(source, options, |key, value| {
            let current = target.get(key.clone());
            let merged = self.merge(&current, &value, depth + 1);
            target.set(key, merged);
        });
        target.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Object, Symbol};
    use crate::value;

    #[test]
    fn test_shallow_merge_overwrites() {
        let merged = shallow_merge(&value!({ "a": 1 }), &value!({ "a": 2, "b": 3 }));
        assert_eq!(merged, value!({ "a": 2, "b": 3 }));
    }

    #[test]
    fn test_shallow_merge_precedence() {
        assert_eq!(shallow_merge(&value!({ "a": 1 }), &value!("x")), value!({ "a": 1 }));
        assert_eq!(shallow_merge(&value!("x"), &value!({ "a": 1 })), value!({ "a": 1 }));
        assert_eq!(shallow_merge(&value!(1), &value!(2)), value!(2));
        assert_eq!(shallow_merge(&value!({ "a": 1 }), &value!([1])), value!({ "a": 1 }));
    }

    #[test]
    fn test_shallow_merge_mutates_target_in_place() {
        let target = value!({ "a": 1 });
        let source = value!({ "b": { "c": 2 } });
        let merged = shallow_merge(&target, &source);

        assert!(merged.same_value(&target));
        assert_eq!(target.get("b").get("c").as_i64(), Some(2));
        assert!(target.get("b").same_value(&source.get("b")));
    }

    #[test]
    fn test_shallow_merge_returns_source_reference_when_target_not_plain() {
        let source = value!({ "a": 1 });
        let merged = shallow_merge(&Value::from(Object::instance_of("Point")), &source);
        assert!(merged.same_value(&source));
    }

    #[test]
    fn test_deep_merge_nested() {
        let merged = deep_merge(&value!({ "a": { "x": 1 } }), &value!({ "a": { "y": 2 } }));
        assert_eq!(merged, value!({ "a": { "x": 1, "y": 2 } }));
    }

    #[test]
    fn test_deep_merge_non_plain_source_keeps_target_branch() {
        let merged = deep_merge(
            &value!({ "a": { "x": 1 }, "b": 1 }),
            &value!({ "a": 5, "b": { "y": 2 } }),
        );
        assert_eq!(merged, value!({ "a": { "x": 1 }, "b": { "y": 2 } }));
    }

    #[test]
    fn test_deep_merge_arrays_replace() {
        let merged = deep_merge(&value!({ "list": [1, 2, 3] }), &value!({ "list": [9] }));
        assert_eq!(merged, value!({ "list": [9] }));
    }

    #[test]
    fn test_deep_merge_cyclic_source_terminates() {
        let source = Object::new();
        source.set("name", Value::from("loop"));
        source.set("self", Value::from(source.clone()));
        let source = Value::from(source);

        let merged = deep_merge(&value!({}), &source);
        assert_eq!(merged.get("name").as_str(), Some("loop"));
        assert!(merged.get("self").same_value(&source));
    }

    #[test]
    fn test_deep_merge_repeated_source_is_taken_as_is() {
        let shared = value!({ "y": 2 });
        let source = Object::new();
        source.set("first", shared.clone());
        source.set("second", shared.clone());

        let merged = deep_merge(
            &value!({ "first": { "x": 1 }, "second": { "x": 1 } }),
            &Value::from(source),
        );
        assert_eq!(merged.get("first"), value!({ "x": 1, "y": 2 }));
        assert!(merged.get("second").same_value(&shared));
    }

    #[test]
    fn test_deep_merge_with_max_depth() {
        let target = value!({ "a": { "b": { "x": 1 } } });
        let source = value!({ "a": { "b": { "y": 2 } } });
        let options = TraversalOptions::new().with_max_depth(1);

        let merged = deep_merge_with(&target, &source, &options);
        assert_eq!(merged, value!({ "a": { "b": { "y": 2 } } }));
    }

    #[test]
    fn test_deep_merge_in_shares_visited_set() {
        let source = value!({ "a": 1 });
        let mut visited = VisitedSet::new();
        visited.insert(&source, source.clone());

        let merged = deep_merge_in(&value!({ "b": 2 }), &source, &mut visited);
        assert!(merged.same_value(&source));
    }

    #[test]
    fn test_deep_merge_copies_symbol_keys() {
        let tag = Symbol::new(Some("tag"));
        let source = Object::new();
        source.set(tag.clone(), Value::from(1));

        let merged = deep_merge(&value!({}), &Value::from(source));
        assert_eq!(merged.get(tag).as_i64(), Some(1));
    }
}
