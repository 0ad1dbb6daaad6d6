//! Configuration options for traversals.
//!
//! [`TraversalOptions`] tunes [`each_with`](crate::each_with),
//! [`deep_clone_with`](crate::deep_clone_with) and
//! [`deep_merge_with`](crate::deep_merge_with). The defaults match the plain
//! `each` / `deep_clone` / `deep_merge` entry points.
//!
//! ## Examples
//!
//! ```rust
//! use valuekit::{deep_clone_with, value, TraversalOptions};
//!
//! let nested = value!({ "a": { "b": { "c": 1 } } });
//!
//! // Copy two levels, share everything below.
//! let options = TraversalOptions::new().with_max_depth(1);
//! let copy = deep_clone_with(&nested, &options);
//!
//! assert!(!copy.get("a").same_value(&nested.get("a")));
//! assert!(copy.get("a").get("b").same_value(&nested.get("a").get("b")));
//! ```

/// Configuration for uniform iteration and the deep operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalOptions {
    /// Visit symbol-keyed properties during keyed iteration.
    pub include_symbol_keys: bool,
    /// Deepest level the deep operations recurse into; `None` is unbounded.
    pub max_depth: Option<usize>,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        TraversalOptions {
            include_symbol_keys: true,
            max_depth: None,
        }
    }
}

impl TraversalOptions {
    /// Creates default options (symbol keys included, unbounded depth).
    ///
    /// ```rust
    /// use valuekit::TraversalOptions;
    ///
    /// let options = TraversalOptions::new();
    /// assert!(options.include_symbol_keys);
    /// assert_eq!(options.max_depth, None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether keyed iteration visits symbol keys.
    #[must_use]
    pub fn with_symbol_keys(mut self, include: bool) -> Self {
        self.include_symbol_keys = include;
        self
    }

    /// Limits recursion depth.
    ///
    /// The root composite is depth 0. A composite reached at `max_depth` is
    /// handled by the shallow operation instead of being recursed into, and
    /// a warning is logged.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub(crate) fn depth_exceeded(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth >= max)
    }
}
