//! Dynamic value representation.
//!
//! This module provides the [`Value`] enum, which models every value the
//! classifier, the iterator and the clone/merge operations accept.
//!
//! ## Core Types
//!
//! - [`Value`]: undefined, null, booleans, numbers, strings, symbols, big
//!   integers, dates, regular expressions, errors, functions, arrays, objects
//! - [`Number`]: integers, floats and the special values (Infinity, -Infinity, NaN)
//! - [`Array`], [`Object`], [`Function`], [`ErrorObject`], [`Symbol`]: shared handles
//!
//! ## Reference semantics
//!
//! Arrays, objects, functions, errors and symbols are reference-counted
//! handles. Cloning a [`Value`] with [`Clone::clone`] copies the handle, never
//! the contents, so two values may point at the same array. Use
//! [`Value::same_value`] to compare identity and `==` to compare structure.
//!
//! ```rust
//! use valuekit::{value, Value};
//!
//! let original = value!({ "a": 1 });
//! let alias = original.clone();
//! alias.set("a", Value::from(2));
//!
//! assert!(alias.same_value(&original));
//! assert_eq!(original.get("a").as_i64(), Some(2));
//! ```
//!
//! Reference cycles are allowed (`o.self = o`). Like any `Rc` cycle they are
//! not reclaimed when dropped; break them with [`Value::set`] or
//! [`Object::remove`] if that matters.

use crate::map::{PropertyKey, PropertyMap, MAX_INDEX};
use crate::types::{classify, TypeTag};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::cell::{Ref, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A dynamically-typed value.
///
/// # Examples
///
/// ```rust
/// use valuekit::{Number, Value};
///
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::from("hello");
///
/// assert!(Value::Undefined.is_undefined());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Symbol(Symbol),
    BigInt(BigInt),
    Date(DateTime<Utc>),
    RegExp(RegExp),
    Error(ErrorObject),
    Function(Function),
    Array(Array),
    Object(Object),
}

/// A numeric value that can be an integer, float, or special value.
///
/// # Examples
///
/// ```rust
/// use valuekit::Number;
///
/// assert!(Number::Integer(42).is_integer());
/// assert_eq!(Number::Float(3.5).as_f64(), 3.5);
/// assert!(Number::Infinity.is_special());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Infinity,
    NegativeInfinity,
    NaN,
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` if this is a special value (Infinity, -Infinity, or NaN).
    #[inline]
    #[must_use]
    pub const fn is_special(&self) -> bool {
        matches!(
            self,
            Number::Infinity | Number::NegativeInfinity | Number::NaN
        )
    }

    /// Returns `true` if the number is NaN, whether tagged or stored as a float.
    #[inline]
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.as_f64().is_nan()
    }

    /// Maps an `f64` onto the matching variant, tagging the special values.
    ///
    /// ```rust
    /// use valuekit::Number;
    ///
    /// assert_eq!(Number::from_f64(f64::NAN), Number::NaN);
    /// assert_eq!(Number::from_f64(2.5), Number::Float(2.5));
    /// ```
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Number::NaN
        } else if value == f64::INFINITY {
            Number::Infinity
        } else if value == f64::NEG_INFINITY {
            Number::NegativeInfinity
        } else {
            Number::Float(value)
        }
    }

    /// Converts this number to an `i64` if possible.
    ///
    /// Returns `Some(i64)` for integers and floats with no fractional part
    /// that fit in i64 range. Returns `None` for special values and
    /// out-of-range floats.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
            Number::Infinity => f64::INFINITY,
            Number::NegativeInfinity => f64::NEG_INFINITY,
            Number::NaN => f64::NAN,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) if fl.is_nan() => write!(f, "NaN"),
            Number::Float(fl) if fl.is_infinite() => {
                write!(f, "{}Infinity", if *fl < 0.0 { "-" } else { "" })
            }
            Number::Float(fl) => write!(f, "{}", fl),
            Number::Infinity => write!(f, "Infinity"),
            Number::NegativeInfinity => write!(f, "-Infinity"),
            Number::NaN => write!(f, "NaN"),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
    }
}

/// A unique symbol. Equality and hashing follow identity, not description.
///
/// ```rust
/// use valuekit::Symbol;
///
/// let a = Symbol::new(Some("id"));
/// let b = Symbol::new(Some("id"));
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Clone)]
pub struct Symbol(Rc<Option<String>>);

impl Symbol {
    #[must_use]
    pub fn new(description: Option<&str>) -> Self {
        Symbol(Rc::new(description.map(str::to_string)))
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A regular expression literal, kept as source text and flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegExp {
    source: String,
    flags: String,
}

impl RegExp {
    #[must_use]
    pub fn new(source: &str, flags: &str) -> Self {
        RegExp {
            source: source.to_string(),
            flags: flags.to_string(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// The concrete kind of an [`ErrorObject`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Error,
    TypeError,
    RangeError,
    ReferenceError,
    SyntaxError,
    EvalError,
    UriError,
    /// A user-defined error subclass, by name.
    Custom(String),
}

impl ErrorKind {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::EvalError => "EvalError",
            ErrorKind::UriError => "URIError",
            ErrorKind::Custom(name) => name,
        }
    }
}

#[derive(Debug)]
struct ErrorData {
    kind: ErrorKind,
    message: String,
}

/// A shared error instance.
#[derive(Clone, Debug)]
pub struct ErrorObject(Rc<ErrorData>);

impl ErrorObject {
    #[must_use]
    pub fn new(kind: ErrorKind, message: &str) -> Self {
        ErrorObject(Rc::new(ErrorData {
            kind,
            message: message.to_string(),
        }))
    }

    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.0.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.0.message
    }

    /// Returns `true` if both handles point at the same error.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message().is_empty() {
            write!(f, "{}", self.kind().name())
        } else {
            write!(f, "{}: {}", self.kind().name(), self.message())
        }
    }
}

type NativeFn = dyn Fn(&[Value]) -> Value;

struct FunctionData {
    name: String,
    body: Box<NativeFn>,
}

/// A shared callable.
///
/// ```rust
/// use valuekit::{Function, Value};
///
/// let double = Function::new("double", |args| {
///     Value::from(args.first().and_then(Value::as_f64).unwrap_or(0.0) * 2.0)
/// });
/// assert_eq!(double.call(&[Value::from(21)]).as_f64(), Some(42.0));
/// ```
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Function(Rc::new(FunctionData {
            name: name.to_string(),
            body: Box::new(body),
        }))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0.body)(args)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name().is_empty() {
            write!(f, "[Function (anonymous)]")
        } else {
            write!(f, "[Function: {}]", self.name())
        }
    }
}

/// A shared, growable array.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns the element at `index`, or `Undefined` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Value {
        self.0.borrow().get(index).cloned().unwrap_or_default()
    }

    /// Writes `index`, padding any gap with `Undefined`. Returns `false`,
    /// leaving the array untouched, past the largest valid array index.
    pub fn set(&self, index: usize, value: Value) -> bool {
        if index > MAX_INDEX {
            return false;
        }
        let mut elements = self.0.borrow_mut();
        if index >= elements.len() {
            elements.resize(index + 1, Value::Undefined);
        }
        elements[index] = value;
        true
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Borrows the elements. Do not hold the guard across calls that may
    /// write to this array.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<Value>> for Array {
    fn from(elements: Vec<Value>) -> Self {
        Array(Rc::new(RefCell::new(elements)))
    }
}

/// What an object inherits from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prototype {
    /// Created without a prototype.
    None,
    /// The universal base object.
    Object,
    /// An instance of a named class.
    Class(String),
}

#[derive(Debug)]
struct ObjectData {
    prototype: Prototype,
    class_tag: Option<String>,
    properties: PropertyMap,
}

/// A shared object with an ordered own-property map.
///
/// Objects that reference themselves, directly or through other objects,
/// are never freed.
///
/// ```rust
/// use valuekit::{Object, Prototype, Value};
///
/// let point = Object::instance_of("Point");
/// point.set("x", Value::from(1));
///
/// assert_eq!(point.prototype(), Prototype::Class("Point".to_string()));
/// assert_eq!(point.get(&"x".into()).as_i64(), Some(1));
/// ```
#[derive(Clone)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    /// Creates an empty object inheriting from the base object.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prototype(Prototype::Object)
    }

    /// Creates an empty object with no prototype.
    #[must_use]
    pub fn with_null_prototype() -> Self {
        Self::with_prototype(Prototype::None)
    }

    /// Creates an empty instance of the class `name`.
    #[must_use]
    pub fn instance_of(name: &str) -> Self {
        Self::with_prototype(Prototype::Class(name.to_string()))
    }

    #[must_use]
    pub fn with_prototype(prototype: Prototype) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            prototype,
            class_tag: None,
            properties: PropertyMap::new(),
        })))
    }

    /// Overrides the class tag (the `X` of `[object X]`), e.g. `"Map"`.
    #[must_use]
    pub fn tagged(self, tag: &str) -> Self {
        self.0.borrow_mut().class_tag = Some(tag.to_string());
        self
    }

    /// Creates an empty object of the same concrete kind: same prototype and
    /// class tag, no properties.
    #[must_use]
    pub fn empty_like(&self) -> Self {
        let data = self.0.borrow();
        Object(Rc::new(RefCell::new(ObjectData {
            prototype: data.prototype.clone(),
            class_tag: data.class_tag.clone(),
            properties: PropertyMap::new(),
        })))
    }

    #[must_use]
    pub fn prototype(&self) -> Prototype {
        self.0.borrow().prototype.clone()
    }

    /// Returns the class tag, `"Object"` unless overridden.
    #[must_use]
    pub fn class_tag(&self) -> String {
        self.0
            .borrow()
            .class_tag
            .clone()
            .unwrap_or_else(|| "Object".to_string())
    }

    #[must_use]
    pub fn get(&self, key: &PropertyKey) -> Value {
        self.0
            .borrow()
            .properties
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set(&self, key: impl Into<PropertyKey>, value: Value) -> Option<Value> {
        self.0.borrow_mut().properties.insert(key.into(), value)
    }

    #[must_use]
    pub fn has(&self, key: &PropertyKey) -> bool {
        self.0.borrow().properties.contains_key(key)
    }

    pub fn remove(&self, key: &PropertyKey) -> Option<Value> {
        self.0.borrow_mut().properties.remove(key)
    }

    /// Own keys in enumeration order, symbols included.
    #[must_use]
    pub fn keys(&self) -> Vec<PropertyKey> {
        self.0
            .borrow()
            .properties
            .keys()
            .into_iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().properties.is_empty()
    }

    /// Borrows the property map. Do not hold the guard across calls that may
    /// write to this object.
    #[must_use]
    pub fn properties(&self) -> Ref<'_, PropertyMap> {
        Ref::map(self.0.borrow(), |data| &data.properties)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl From<PropertyMap> for Object {
    fn from(properties: PropertyMap) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            prototype: Prototype::Object,
            class_tag: None,
            properties,
        })))
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for `Null` and `Undefined`.
    #[inline]
    #[must_use]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bigint(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_regexp(&self) -> bool {
        matches!(self, Value::RegExp(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Returns the canonical [`TypeTag`] of this value.
    #[inline]
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        classify(self)
    }

    /// Returns the internal class tag, the `X` of `"[object X]"`.
    ///
    /// ```rust
    /// use valuekit::{Object, Value};
    ///
    /// assert_eq!(Value::from(1).class_tag(), "Number");
    /// assert_eq!(Value::Object(Object::new().tagged("Map")).class_tag(), "Map");
    /// ```
    #[must_use]
    pub fn class_tag(&self) -> Cow<'static, str> {
        let tag = match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::BigInt(_) => "BigInt",
            Value::Date(_) => "Date",
            Value::RegExp(_) => "RegExp",
            Value::Error(_) => "Error",
            Value::Function(_) => "Function",
            Value::Array(_) => "Array",
            Value::Object(obj) => return Cow::Owned(obj.class_tag()),
        };
        Cow::Borrowed(tag)
    }

    /// Reads a property. Arrays expose their indices and `length`; every
    /// other non-object yields `Undefined`.
    ///
    /// ```rust
    /// use valuekit::{value, Value};
    ///
    /// let list = value!(["a", "b"]);
    /// assert_eq!(list.get(1).as_str(), Some("b"));
    /// assert_eq!(list.get("length").as_i64(), Some(2));
    /// assert!(Value::from(5).get("x").is_undefined());
    /// ```
    #[must_use]
    pub fn get(&self, key: impl Into<PropertyKey>) -> Value {
        let key = key.into();
        match self {
            Value::Array(arr) => match &key {
                PropertyKey::Index(i) => arr.get(*i),
                PropertyKey::Name(name) if name == "length" => Value::from(arr.len()),
                _ => Value::Undefined,
            },
            Value::Object(obj) => obj.get(&key),
            _ => Value::Undefined,
        }
    }

    /// Writes a property. Returns `false`, leaving the value untouched, when
    /// the target cannot hold the key.
    pub fn set(&self, key: impl Into<PropertyKey>, value: Value) -> bool {
        match (self, key.into()) {
            (Value::Array(arr), PropertyKey::Index(i)) => arr.set(i, value),
            (Value::Object(obj), key) => {
                obj.set(key, value);
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if the value has `key` as an own property.
    #[must_use]
    pub fn has(&self, key: impl Into<PropertyKey>) -> bool {
        let key = key.into();
        match self {
            Value::Array(arr) => match &key {
                PropertyKey::Index(i) => *i < arr.len(),
                PropertyKey::Name(name) => name == "length",
                PropertyKey::Symbol(_) => false,
            },
            Value::Object(obj) => obj.has(&key),
            _ => false,
        }
    }

    /// Own enumerable keys in enumeration order. Only arrays and objects
    /// carry own properties.
    #[must_use]
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        match self {
            Value::Array(arr) => (0..arr.len()).map(PropertyKey::Index).collect(),
            Value::Object(obj) => obj.keys(),
            _ => Vec::new(),
        }
    }

    /// Strict identity comparison (`===`).
    ///
    /// Handles compare by pointer. Everything else compares by value, with
    /// `NaN` unequal to itself.
    ///
    /// ```rust
    /// use valuekit::value;
    ///
    /// let a = value!({});
    /// let b = value!({});
    /// assert!(a.same_value(&a.clone()));
    /// assert!(!a.same_value(&b));
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Error(a), Value::Error(b)) => a.ptr_eq(b),
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::RegExp(a), Value::RegExp(b)) => a == b,
            _ => false,
        }
    }

    /// Address of the shared allocation behind a handle variant.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(Rc::as_ptr(&arr.0) as *const () as usize),
            Value::Object(obj) => Some(Rc::as_ptr(&obj.0) as *const () as usize),
            Value::Function(func) => Some(Rc::as_ptr(&func.0) as *const () as usize),
            Value::Error(err) => Some(Rc::as_ptr(&err.0) as *const () as usize),
            Value::Symbol(sym) => Some(Rc::as_ptr(&sym.0) as *const () as usize),
            _ => None,
        }
    }
}

// Structural equality. Pairs already under comparison are assumed equal,
// which makes cyclic graphs terminate.
fn structural_eq(a: &Value, b: &Value, seen: &mut HashSet<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            if let (Some(ia), Some(ib)) = (a.identity(), b.identity()) {
                if !seen.insert((ia, ib)) {
                    return true;
                }
            }
            let (left, right) = (x.to_vec(), y.to_vec());
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right.iter())
                    .all(|(l, r)| structural_eq(l, r, seen))
        }
        (Value::Object(x), Value::Object(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            if let (Some(ia), Some(ib)) = (a.identity(), b.identity()) {
                if !seen.insert((ia, ib)) {
                    return true;
                }
            }
            if x.prototype() != y.prototype() || x.class_tag() != y.class_tag() {
                return false;
            }
            let (left, right) = (x.keys(), y.keys());
            left == right
                && left
                    .iter()
                    .all(|k| structural_eq(&x.get(k), &y.get(k), seen))
        }
        (Value::Error(x), Value::Error(y)) => x.kind() == y.kind() && x.message() == y.message(),
        (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_eq(x, y),
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::RegExp(x), Value::RegExp(y)) => x == y,
        _ => false,
    }
}

// SameValueZero: `NaN` equals itself, `0` equals `-0`, and the storage
// variant does not matter.
fn numbers_eq(x: &Number, y: &Number) -> bool {
    if let (Number::Integer(a), Number::Integer(b)) = (x, y) {
        return a == b;
    }
    let (a, b) = (x.as_f64(), y.as_f64());
    a == b || (a.is_nan() && b.is_nan())
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        structural_eq(self, other, &mut HashSet::new())
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "{:?}", s)
}

// `stack` holds the composites currently being printed, so a revisit is a cycle.
fn write_value(
    value: &Value,
    f: &mut fmt::Formatter<'_>,
    stack: &mut Vec<usize>,
    nested: bool,
) -> fmt::Result {
    match value {
        Value::Undefined => write!(f, "undefined"),
        Value::Null => write!(f, "null"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Number(n) => write!(f, "{}", n),
        Value::String(s) if nested => write_string(f, s),
        Value::String(s) => write!(f, "{}", s),
        Value::Symbol(sym) => write!(f, "{}", sym),
        Value::BigInt(bi) => write!(f, "{}n", bi),
        Value::Date(dt) => write!(f, "{}", dt.to_rfc3339()),
        Value::RegExp(re) => write!(f, "{}", re),
        Value::Error(err) => write!(f, "{}", err),
        Value::Function(func) => write!(f, "{:?}", func),
        Value::Array(arr) => {
            let id = Rc::as_ptr(&arr.0) as *const () as usize;
            if stack.contains(&id) {
                return write!(f, "[Circular]");
            }
            stack.push(id);
            write!(f, "[")?;
            for (i, element) in arr.to_vec().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_value(element, f, stack, true)?;
            }
            stack.pop();
            write!(f, "]")
        }
        Value::Object(obj) => {
            let id = Rc::as_ptr(&obj.0) as *const () as usize;
            if stack.contains(&id) {
                return write!(f, "[Circular]");
            }
            stack.push(id);
            match obj.prototype() {
                Prototype::Object => {}
                Prototype::None => write!(f, "[Object: null prototype] ")?,
                Prototype::Class(name) => write!(f, "{} ", name)?,
            }
            let keys = obj.keys();
            if keys.is_empty() {
                write!(f, "{{}}")?;
            } else {
                write!(f, "{{ ")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: ", key)?;
                    write_value(&obj.get(key), f, stack, true)?;
                }
                write!(f, " }}")?;
            }
            stack.pop();
            Ok(())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(self, f, &mut Vec::new(), false)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(self, f, &mut Vec::new(), true)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Array(self.clone()), f)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Object(self.clone()), f)
    }
}

// Serialization carries the stack of open composites so cycles surface as
// `Error::Circular` rather than unbounded recursion.
struct Guarded<'a> {
    value: &'a Value,
    stack: &'a RefCell<Vec<usize>>,
}

impl Serialize for Guarded<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::Error as _;

        let id = match self.value {
            Value::Array(_) | Value::Object(_) => self.value.identity(),
            _ => None,
        };
        if let Some(id) = id {
            if self.stack.borrow().contains(&id) {
                return Err(S::Error::custom(crate::Error::Circular));
            }
            self.stack.borrow_mut().push(id);
        }

        let result = self.write(serializer);
        if id.is_some() {
            self.stack.borrow_mut().pop();
        }
        result
    }
}

impl Guarded<'_> {
    fn write<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{Error as _, SerializeMap, SerializeSeq};

        match self.value {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(n) => serializer.serialize_f64(n.as_f64()),
            Value::String(s) => serializer.serialize_str(s),
            Value::BigInt(bi) => serializer.serialize_str(&format!("{}n", bi)),
            Value::Date(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Value::RegExp(re) => serializer.serialize_str(&re.to_string()),
            Value::Error(err) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("name", err.kind().name())?;
                map.serialize_entry("message", err.message())?;
                map.end()
            }
            Value::Symbol(_) | Value::Function(_) => Err(S::Error::custom(
                crate::Error::Unserializable(classify(self.value)),
            )),
            Value::Array(arr) => {
                let elements = arr.to_vec();
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in &elements {
                    seq.serialize_element(&Guarded {
                        value: element,
                        stack: self.stack,
                    })?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let keys: Vec<PropertyKey> =
                    obj.keys().into_iter().filter(|k| !k.is_symbol()).collect();
                let mut map = serializer.serialize_map(Some(keys.len()))?;
                for key in &keys {
                    let value = obj.get(key);
                    map.serialize_entry(
                        &key.to_string(),
                        &Guarded {
                            value: &value,
                            stack: self.stack,
                        },
                    )?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let stack = RefCell::new(Vec::new());
        Guarded {
            value: self,
            stack: &stack,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any self-describing value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(Value::Number(Number::Integer(i))),
                    Err(_) => Ok(Value::BigInt(BigInt::from(value))),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from_f64(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::from(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = PropertyMap::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    values.insert(PropertyKey::from(key), value);
                }
                Ok(Value::from(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| crate::Error::type_mismatch("integer", &value))
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::type_mismatch("number", &value))
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| crate::Error::type_mismatch("boolean", &value))
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("string", &other)),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(i) => Value::Number(Number::Integer(i)),
            Err(_) => Value::Number(Number::Float(value as f64)),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::from_f64(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}

impl From<RegExp> for Value {
    fn from(value: RegExp) -> Self {
        Value::RegExp(value)
    }
}

impl From<ErrorObject> for Value {
    fn from(value: ErrorObject) -> Self {
        Value::Error(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::from(value))
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<PropertyMap> for Value {
    fn from(value: PropertyMap) -> Self {
        Value::Object(Object::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tryfrom_i64() {
        let value = Value::Number(Number::Integer(42));
        let result: i64 = TryFrom::try_from(value).unwrap();
        assert_eq!(result, 42);

        let value = Value::Number(Number::Float(42.0));
        let result: i64 = TryFrom::try_from(value).unwrap();
        assert_eq!(result, 42);

        let value = Value::String("test".to_string());
        assert!(i64::try_from(value).is_err());
    }

    #[test]
    fn test_tryfrom_string_reports_found_type() {
        let err = String::try_from(Value::from(true)).unwrap_err();
        assert!(err.to_string().contains("boolean"));
    }

    #[test]
    fn test_array_set_pads_with_undefined() {
        let arr = Array::new();
        arr.set(2, Value::from("c"));
        assert_eq!(arr.len(), 3);
        assert!(arr.get(0).is_undefined());
        assert_eq!(arr.get(2).as_str(), Some("c"));
    }

    #[test]
    fn test_array_set_past_max_index_is_rejected() {
        let arr = Array::new();
        assert!(!arr.set(usize::MAX, Value::from(1)));
        assert!(arr.is_empty());

        let list = Value::from(arr);
        assert!(!list.set(usize::MAX, Value::from(1)));
        assert_eq!(list.get("length").as_i64(), Some(0));
    }

    #[test]
    fn test_number_equality_ignores_storage() {
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_eq!(Value::from(f64::NAN), Value::Number(Number::NaN));
        assert_eq!(Value::Number(Number::Float(f64::NAN)), Value::Number(Number::NaN));
        assert_eq!(
            Value::Number(Number::Float(f64::INFINITY)),
            Value::Number(Number::Infinity)
        );
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_eq!(Value::from(0.0), Value::from(-0.0));
        assert_ne!(Value::from(1), Value::from(2));
        assert_ne!(Value::from(f64::NAN), Value::from(0));

        assert!(matches!(Value::from(f64::NAN), Value::Number(Number::NaN)));
        assert!(matches!(
            Value::from(f64::NEG_INFINITY),
            Value::Number(Number::NegativeInfinity)
        ));
    }

    #[test]
    fn test_failed_serialization_leaves_stack_empty() {
        let holder = Object::new();
        holder.set("f", Value::from(Function::new("f", |_| Value::Null)));
        let value = Value::from(vec![Value::from(holder)]);

        let stack = RefCell::new(Vec::new());
        let guarded = Guarded {
            value: &value,
            stack: &stack,
        };
        assert!(serde_json::to_string(&guarded).is_err());
        assert!(stack.borrow().is_empty());
    }

    #[test]
    fn test_set_on_primitive_is_ignored() {
        assert!(!Value::from(1).set("a", Value::Null));
        assert!(!Value::from(Vec::<Value>::new()).set("name", Value::Null));
    }

    #[test]
    fn test_same_value() {
        assert!(Value::Null.same_value(&Value::Null));
        assert!(!Value::Null.same_value(&Value::Undefined));
        assert!(Value::from(1).same_value(&Value::from(1.0)));
        assert!(!Value::Number(Number::NaN).same_value(&Value::Number(Number::NaN)));

        let err = ErrorObject::new(ErrorKind::TypeError, "bad");
        let copy = ErrorObject::new(ErrorKind::TypeError, "bad");
        assert!(Value::from(err.clone()).same_value(&Value::from(err.clone())));
        assert!(!Value::from(err.clone()).same_value(&Value::from(copy.clone())));
        assert_eq!(Value::from(err), Value::from(copy));
    }

    #[test]
    fn test_structural_eq_respects_prototype() {
        let plain = Value::from(Object::new());
        let bare = Value::from(Object::with_null_prototype());
        let instance = Value::from(Object::instance_of("Point"));
        assert_ne!(plain, bare);
        assert_ne!(plain, instance);
        assert_eq!(bare, Value::from(Object::with_null_prototype()));
    }

    #[test]
    fn test_structural_eq_terminates_on_cycles() {
        let a = Object::new();
        a.set("self", Value::from(a.clone()));
        let b = Object::new();
        b.set("self", Value::from(b.clone()));
        assert_eq!(Value::from(a), Value::from(b));
    }

    #[test]
    fn test_display_marks_cycles() {
        let obj = Object::new();
        obj.set("name", Value::from("loop"));
        obj.set("self", Value::from(obj.clone()));
        assert_eq!(
            Value::from(obj).to_string(),
            "{ name: \"loop\", self: [Circular] }"
        );
    }

    #[test]
    fn test_display_shared_reference_is_not_circular() {
        let shared = Value::from(vec![Value::from(1)]);
        let outer = Value::from(vec![shared.clone(), shared]);
        assert_eq!(outer.to_string(), "[[1], [1]]");
    }

    #[test]
    fn test_display_primitives() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(format!("{:?}", Value::from("quoted")), "\"quoted\"");
        assert_eq!(Value::from(BigInt::from(7)).to_string(), "7n");
        assert_eq!(Value::from(RegExp::new("a+", "gi")).to_string(), "/a+/gi");
        assert_eq!(
            Value::from(ErrorObject::new(ErrorKind::RangeError, "too big")).to_string(),
            "RangeError: too big"
        );
        assert_eq!(Value::from(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    fn test_array_length_property() {
        let arr = Value::from(vec![Value::Null, Value::Null]);
        assert!(arr.has("length"));
        assert_eq!(arr.get("length").as_i64(), Some(2));
        assert!(arr.has(1usize));
        assert!(!arr.has(2usize));
    }
}
