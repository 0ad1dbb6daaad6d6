//! Ordered own-property storage for objects.
//!
//! This module provides [`PropertyMap`], a wrapper around [`IndexMap`] that keeps
//! the own properties of an [`Object`](crate::Object), and [`PropertyKey`], the
//! key type shared by objects, arrays and the uniform iterator.
//!
//! ## Enumeration order
//!
//! Keys are stored in insertion order, but [`PropertyMap::keys`] and
//! [`PropertyMap::iter`] yield them in enumeration order:
//!
//! 1. array indices, ascending
//! 2. names, in insertion order
//! 3. symbols, in insertion order
//!
//! ## Examples
//!
//! ```rust
//! use valuekit::{PropertyKey, PropertyMap, Value};
//!
//! let mut map = PropertyMap::new();
//! map.insert("name".into(), Value::from("Alice"));
//! map.insert("1".into(), Value::from(true));
//! map.insert("0".into(), Value::from(false));
//!
//! let keys: Vec<_> = map.keys().into_iter().cloned().collect();
//! assert_eq!(
//!     keys,
//!     vec![PropertyKey::Index(0), PropertyKey::Index(1), PropertyKey::from("name")]
//! );
//! ```

use crate::value::{Symbol, Value};
use indexmap::IndexMap;
use std::fmt;

/// Largest valid array index (`2^32 - 2`).
pub(crate) const MAX_INDEX: usize = u32::MAX as usize - 1;

/// The key of an own property.
///
/// Canonical numeric names such as `"0"` or `"42"` are normalized to
/// [`PropertyKey::Index`] on conversion, so `"0"` and `0usize` address the
/// same property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Index(usize),
    Name(String),
    Symbol(Symbol),
}

impl PropertyKey {
    /// Returns `true` if this key is an array index.
    #[inline]
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, PropertyKey::Index(_))
    }

    /// Returns `true` if this key is a symbol.
    #[inline]
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }

    /// Returns the index if this key is an array index.
    #[inline]
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PropertyKey::Index(i) => Some(*i),
            _ => None,
        }
    }

    /// Builds the key a numeric property access would address.
    ///
    /// Whole, non-negative numbers in index range become indices; anything
    /// else becomes the number's string form (`"1.5"`, `"-1"`, `"Infinity"`).
    ///
    /// ```rust
    /// use valuekit::PropertyKey;
    ///
    /// assert_eq!(PropertyKey::from_number(3.0), PropertyKey::Index(3));
    /// assert_eq!(PropertyKey::from_number(1.5), PropertyKey::from("1.5"));
    /// ```
    #[must_use]
    pub fn from_number(n: f64) -> Self {
        if n.fract() == 0.0 && n >= 0.0 && n <= MAX_INDEX as f64 {
            PropertyKey::Index(n as usize)
        } else {
            PropertyKey::Name(crate::value::Number::from_f64(n).to_string())
        }
    }
}

fn parse_index(name: &str) -> Option<usize> {
    if name == "0" {
        return Some(0);
    }
    if name.starts_with('0') || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse::<usize>().ok().filter(|i| *i <= MAX_INDEX)
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        match parse_index(name) {
            Some(i) => PropertyKey::Index(i),
            None => PropertyKey::Name(name.to_string()),
        }
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        match parse_index(&name) {
            Some(i) => PropertyKey::Index(i),
            None => PropertyKey::Name(name),
        }
    }
}

impl From<usize> for PropertyKey {
    fn from(index: usize) -> Self {
        if index <= MAX_INDEX {
            PropertyKey::Index(index)
        } else {
            PropertyKey::Name(index.to_string())
        }
    }
}

impl From<i32> for PropertyKey {
    fn from(index: i32) -> Self {
        match usize::try_from(index) {
            Ok(i) => PropertyKey::Index(i),
            Err(_) => PropertyKey::Name(index.to_string()),
        }
    }
}

impl From<Symbol> for PropertyKey {
    fn from(symbol: Symbol) -> Self {
        PropertyKey::Symbol(symbol)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Index(i) => write!(f, "{}", i),
            PropertyKey::Name(name) => write!(f, "{}", name),
            PropertyKey::Symbol(symbol) => write!(f, "[{}]", symbol),
        }
    }
}

/// An ordered map of property keys to values.
///
/// # Examples
///
/// ```rust
/// use valuekit::{PropertyMap, Value};
///
/// let mut map = PropertyMap::new();
/// map.insert("first".into(), Value::from(1));
/// map.insert("second".into(), Value::from(2));
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&"first".into()).and_then(|v| v.as_i64()), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyMap(IndexMap<PropertyKey, Value>);

impl PropertyMap {
    /// Creates an empty `PropertyMap`.
    #[must_use]
    pub fn new() -> Self {
        PropertyMap(IndexMap::new())
    }

    /// Creates an empty `PropertyMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PropertyMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the value is replaced in place
    /// (keeping its position) and the old value is returned.
    pub fn insert(&mut self, key: PropertyKey, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &PropertyKey) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes a key, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &PropertyKey) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &PropertyKey) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of properties in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map has no properties, symbol-keyed ones included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the keys in enumeration order.
    #[must_use]
    pub fn keys(&self) -> Vec<&PropertyKey> {
        let mut indices: Vec<&PropertyKey> = self.0.keys().filter(|k| k.is_index()).collect();
        indices.sort_by_key(|k| k.as_index());

        let names = self
            .0
            .keys()
            .filter(|k| matches!(k, PropertyKey::Name(_)));
        let symbols = self.0.keys().filter(|k| k.is_symbol());

        indices.into_iter().chain(names).chain(symbols).collect()
    }

    /// Returns the key-value pairs in enumeration order.
    #[must_use]
    pub fn iter(&self) -> Vec<(&PropertyKey, &Value)> {
        self.keys()
            .into_iter()
            .filter_map(|k| self.0.get_key_value(k))
            .collect()
    }
}

impl IntoIterator for PropertyMap {
    type Item = (PropertyKey, Value);
    type IntoIter = indexmap::map::IntoIter<PropertyKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(PropertyKey, Value)> for PropertyMap {
    fn from_iter<T: IntoIterator<Item = (PropertyKey, Value)>>(iter: T) -> Self {
        PropertyMap(IndexMap::from_iter(iter))
    }
}
