//! Per-traversal cycle guard.

use crate::value::Value;
use std::collections::HashMap;

/// The composites a single deep clone or deep merge has already seen.
///
/// Entries are keyed by handle identity, so membership is O(1). Each entry
/// keeps the original alive alongside the value recorded for it, which rules
/// out address reuse while the traversal runs. Values without identity
/// (numbers, strings, dates, ...) are never recorded.
///
/// Create one per top-level call; pass it to
/// [`deep_clone_in`](crate::deep_clone_in) or
/// [`deep_merge_in`](crate::deep_merge_in) to share it across sub-calls.
#[derive(Default)]
pub struct VisitedSet {
    entries: HashMap<usize, (Value, Value)>,
}

impl VisitedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `value` was recorded.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        value
            .identity()
            .is_some_and(|id| self.entries.contains_key(&id))
    }

    /// Returns what was recorded for `value`.
    #[must_use]
    pub fn get(&self, value: &Value) -> Option<&Value> {
        let id = value.identity()?;
        self.entries.get(&id).map(|(_, recorded)| recorded)
    }

    /// Records `value`, mapped to `recorded`. Returns `false` if `value` has
    /// no identity or was already present.
    pub fn insert(&mut self, value: &Value, recorded: Value) -> bool {
        match value.identity() {
            Some(id) if !self.entries.contains_key(&id) => {
                self.entries.insert(id, (value.clone(), recorded));
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
