//! Structural predicates built on the classifier.
//!
//! ```rust
//! use valuekit::{is_array_like, is_plain_object, is_numeric, value, Object, Value};
//!
//! assert!(is_plain_object(&value!({})));
//! assert!(!is_plain_object(&Value::from(Object::instance_of("Point"))));
//! assert!(is_array_like(&value!({ "0": "a", "1": "b", "length": 2 })));
//! assert!(is_numeric(&Value::from(" 0x1f ")));
//! ```

use crate::map::PropertyKey;
use crate::types::{classify, TypeTag};
use crate::value::{Prototype, Value};

/// Returns `true` for callable values.
#[must_use]
pub fn is_callable(value: &Value) -> bool {
    matches!(value, Value::Function(_))
}

/// Returns `true` for arrays and for objects shaped like one.
///
/// An object qualifies when its `length` property is the number `0`, or a
/// positive number `n` with `n - 1` present as an own key. Callables never
/// qualify; primitives have no own properties and never qualify either.
#[must_use]
pub fn is_array_like(value: &Value) -> bool {
    if is_callable(value) {
        return false;
    }
    if classify(value) == TypeTag::Array {
        return true;
    }
    match value {
        Value::Object(obj) => match obj.get(&PropertyKey::from("length")) {
            Value::Number(n) => {
                let length = n.as_f64();
                length == 0.0 || (length > 0.0 && obj.has(&PropertyKey::from_number(length - 1.0)))
            }
            _ => false,
        },
        _ => false,
    }
}

/// Number of slots the uniform iterator visits for an array-like value.
pub(crate) fn array_like_length(value: &Value) -> usize {
    match value {
        Value::Array(arr) => arr.len(),
        Value::Object(obj) => match obj.get(&PropertyKey::from("length")) {
            Value::Number(n) if n.as_f64().is_finite() && n.as_f64() > 0.0 => {
                n.as_f64().ceil() as usize
            }
            _ => 0,
        },
        _ => 0,
    }
}

/// Returns `true` for objects whose prototype chain ends directly at the
/// base object, or that have no prototype at all.
///
/// Class instances, tagged exotic objects, arrays and every non-object are
/// not plain.
#[must_use]
pub fn is_plain_object(value: &Value) -> bool {
    match value {
        Value::Object(obj) => {
            obj.class_tag() == "Object"
                && matches!(obj.prototype(), Prototype::None | Prototype::Object)
        }
        _ => false,
    }
}

/// Returns `true` when the value has no own enumerable keys, symbols
/// included. `Null` and `Undefined` are never empty objects. A string
/// enumerates one index per character, so only `""` counts as empty.
#[must_use]
pub fn is_empty_object(value: &Value) -> bool {
    match value {
        Value::Null | Value::Undefined => false,
        Value::Array(arr) => arr.is_empty(),
        Value::Object(obj) => obj.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => true,
    }
}

/// Returns `true` for numbers and strings whose numeric coercion is not NaN.
#[must_use]
pub fn is_numeric(value: &Value) -> bool {
    matches!(classify(value), TypeTag::Number | TypeTag::String) && !to_number(value).is_nan()
}

/// Numeric coercion (unary plus).
///
/// Composites other than dates have no numeric form here and give NaN, as
/// do big integers.
///
/// ```rust
/// use valuekit::{to_number, Value};
///
/// assert_eq!(to_number(&Value::from("  12.5e1 ")), 125.0);
/// assert_eq!(to_number(&Value::from("")), 0.0);
/// assert_eq!(to_number(&Value::Null), 0.0);
/// assert!(to_number(&Value::from("12px")).is_nan());
/// ```
#[must_use]
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => string_to_number(s),
        Value::Date(dt) => dt.timestamp_millis() as f64,
        _ => f64::NAN,
    }
}

fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&trimmed[2..], radix);
    }

    if is_decimal_literal(trimmed) {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

// sign? digits? ('.' digits?)? (e sign? digits)?, with at least one mantissa digit
fn is_decimal_literal(text: &str) -> bool {
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let unsigned = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);

    let (mantissa, exponent) = match unsigned.find(&['e', 'E'][..]) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    let (integral, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if integral.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(integral) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(&['+', '-'][..]).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Function, Number, Object, Symbol};

    fn object_with(entries: &[(&str, Value)]) -> Value {
        let obj = Object::new();
        for (key, value) in entries {
            obj.set(*key, value.clone());
        }
        Value::from(obj)
    }

    #[test]
    fn test_is_callable() {
        assert!(is_callable(&Value::from(Function::new("f", |_| Value::Null))));
        assert!(!is_callable(&Value::from(Object::new().tagged("Function"))));
        assert!(!is_callable(&Value::Null));
    }

    #[test]
    fn test_is_array_like() {
        assert!(is_array_like(&Value::from(Vec::<Value>::new())));
        assert!(is_array_like(&object_with(&[("length", Value::from(0))])));
        assert!(is_array_like(&object_with(&[
            ("0", Value::from("a")),
            ("1", Value::from("b")),
            ("length", Value::from(2)),
        ])));
        assert!(!is_array_like(&object_with(&[])));
        assert!(!is_array_like(&object_with(&[
            ("0", Value::from("a")),
            ("length", Value::from(2)),
        ])));
        assert!(!is_array_like(&object_with(&[("length", Value::from("0"))])));
        assert!(!is_array_like(&object_with(&[("length", Value::from(-1))])));
        assert!(!is_array_like(&object_with(&[(
            "length",
            Value::Number(Number::NaN)
        )])));
    }

    #[test]
    fn test_is_array_like_rejects_callables_and_primitives() {
        assert!(!is_array_like(&Value::from(Function::new("f", |_| Value::Null))));
        assert!(!is_array_like(&Value::from("abc")));
        assert!(!is_array_like(&Value::Null));
        assert!(!is_array_like(&Value::Undefined));
    }

    #[test]
    fn test_fractional_length_probes_fractional_key() {
        let value = object_with(&[("1.5", Value::Null), ("length", Value::from(2.5))]);
        assert!(is_array_like(&value));
        assert_eq!(array_like_length(&value), 3);
    }

    #[test]
    fn test_is_plain_object() {
        assert!(is_plain_object(&Value::from(Object::new())));
        assert!(is_plain_object(&Value::from(Object::with_null_prototype())));
        assert!(!is_plain_object(&Value::from(Object::instance_of("Point"))));
        assert!(!is_plain_object(&Value::from(Object::new().tagged("Map"))));
        assert!(!is_plain_object(&Value::from(Vec::<Value>::new())));
        assert!(!is_plain_object(&Value::Null));
        assert!(!is_plain_object(&Value::from(false)));
    }

    #[test]
    fn test_is_empty_object() {
        assert!(is_empty_object(&object_with(&[])));
        assert!(!is_empty_object(&object_with(&[("a", Value::Null)])));
        assert!(!is_empty_object(&Value::Null));
        assert!(!is_empty_object(&Value::Undefined));

        let symbol_only = Object::new();
        symbol_only.set(Symbol::new(Some("hidden")), Value::from(1));
        assert!(!is_empty_object(&Value::from(symbol_only)));

        assert!(is_empty_object(&Value::from(Vec::<Value>::new())));
        assert!(is_empty_object(&Value::from(42)));
    }

    #[test]
    fn test_is_empty_object_counts_string_characters() {
        assert!(!is_empty_object(&Value::from("ab")));
        assert!(is_empty_object(&Value::from("")));
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric(&Value::from(1)));
        assert!(is_numeric(&Value::from(-2.5)));
        assert!(is_numeric(&Value::Number(Number::Infinity)));
        assert!(is_numeric(&Value::from("42")));
        assert!(is_numeric(&Value::from("")));
        assert!(is_numeric(&Value::from(" -1.5e3 ")));
        assert!(is_numeric(&Value::from(".5")));
        assert!(is_numeric(&Value::from("0b101")));
        assert!(is_numeric(&Value::from("-Infinity")));

        assert!(!is_numeric(&Value::Number(Number::NaN)));
        assert!(!is_numeric(&Value::from(f64::NAN)));
        assert!(!is_numeric(&Value::from("abc")));
        assert!(!is_numeric(&Value::from("inf")));
        assert!(!is_numeric(&Value::from("NaN")));
        assert!(!is_numeric(&Value::from("1e")));
        assert!(!is_numeric(&Value::from("-0x10")));
        assert!(!is_numeric(&Value::from("1_000")));
        assert!(!is_numeric(&Value::from(true)));
        assert!(!is_numeric(&Value::Null));
    }

    #[test]
    fn test_to_number_radix() {
        assert_eq!(to_number(&Value::from("0x1F")), 31.0);
        assert_eq!(to_number(&Value::from("0o17")), 15.0);
        assert!(to_number(&Value::from("0x")).is_nan());
        assert!(to_number(&Value::from("0b102")).is_nan());
        assert_eq!(to_number(&Value::from(true)), 1.0);
    }
}
