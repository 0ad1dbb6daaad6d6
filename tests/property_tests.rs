//! Property-based tests for the clone and merge guarantees.
//!
//! Values hold `Rc` handles, so strategies generate a plain `Shape` tree and
//! each test builds the `Value` from it.

use proptest::prelude::*;
use valuekit::{
    classify, deep_clone, deep_merge, is_plain_object, shallow_clone, Number, Object, TypeTag,
    Value,
};

#[derive(Clone, Debug)]
enum Shape {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Tagged(Number),
    Text(String),
    List(Vec<Shape>),
    Map(Vec<(String, Shape)>),
}

impl Shape {
    fn build(&self) -> Value {
        match self {
            Shape::Null => Value::Null,
            Shape::Bool(b) => Value::from(*b),
            Shape::Int(i) => Value::from(*i),
            Shape::Float(f) => Value::from(*f),
            Shape::Tagged(n) => Value::Number(n.clone()),
            Shape::Text(s) => Value::from(s.as_str()),
            Shape::List(items) => Value::from(items.iter().map(Shape::build).collect::<Vec<_>>()),
            Shape::Map(entries) => {
                let obj = Object::new();
                for (key, shape) in entries {
                    obj.set(key.as_str(), shape.build());
                }
                Value::from(obj)
            }
        }
    }
}

fn special_float() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(-0.0),
    ]
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        Just(Shape::Null),
        any::<bool>().prop_map(Shape::Bool),
        any::<i64>().prop_map(Shape::Int),
        (-1.0e9..1.0e9f64).prop_map(Shape::Float),
        special_float().prop_map(Shape::Float),
        prop_oneof![
            Just(Number::NaN),
            Just(Number::Infinity),
            Just(Number::NegativeInfinity),
            Just(Number::Float(f64::NAN)),
            Just(Number::Float(f64::INFINITY)),
            Just(Number::Float(-0.0)),
        ]
        .prop_map(Shape::Tagged),
        "[a-z]{0,8}".prop_map(Shape::Text),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Shape::List),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..6).prop_map(Shape::Map),
        ]
    })
}

fn map_shape() -> impl Strategy<Value = Shape> {
    prop::collection::vec(("[a-z]{1,4}", shape()), 0..6).prop_map(Shape::Map)
}

// Every nested composite of `copy` is a fresh allocation.
fn shares_nothing(copy: &Value, original: &Value) -> bool {
    match (copy, original) {
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            !copy.same_value(original)
                && original
                    .own_keys()
                    .into_iter()
                    .all(|k| shares_nothing(&copy.get(k.clone()), &original.get(k)))
        }
        _ => true,
    }
}

proptest! {
    #[test]
    fn prop_deep_clone_is_structurally_equal(s in shape()) {
        let original = s.build();
        prop_assert_eq!(deep_clone(&original), original);
    }

    #[test]
    fn prop_deep_clone_is_idempotent(s in shape()) {
        let original = s.build();
        prop_assert_eq!(deep_clone(&deep_clone(&original)), deep_clone(&original));
    }

    #[test]
    fn prop_deep_clone_shares_no_composites(s in shape()) {
        let original = s.build();
        prop_assert!(shares_nothing(&deep_clone(&original), &original));
    }

    #[test]
    fn prop_shallow_clone_shares_children(s in shape()) {
        let original = s.build();
        let copy = shallow_clone(&original);
        prop_assert_eq!(&copy, &original);
        for key in original.own_keys() {
            let (child, source) = (copy.get(key.clone()), original.get(key));
            match source {
                Value::Array(_) | Value::Object(_) => prop_assert!(child.same_value(&source)),
                _ => prop_assert_eq!(child, source),
            }
        }
    }

    #[test]
    fn prop_classify_is_stable(s in shape()) {
        let value = s.build();
        let tag = classify(&value);
        prop_assert_eq!(tag, classify(&deep_clone(&value)));
        prop_assert_eq!(tag == TypeTag::Object, is_plain_object(&value));
    }

    #[test]
    fn prop_special_numbers_classify_as_number(f in special_float()) {
        let value = Value::from(f);
        prop_assert_eq!(classify(&value), TypeTag::Number);
        prop_assert_eq!(&deep_clone(&value), &value);
        prop_assert_eq!(&value, &Value::Number(Number::Float(f)));
    }

    #[test]
    fn prop_integer_equals_whole_float(n in any::<i32>()) {
        let int = Value::from(n);
        let float = Value::from(f64::from(n));
        prop_assert_eq!(&int, &float);
        prop_assert!(int.same_value(&float));
        prop_assert_eq!(deep_clone(&int), float);
    }

    #[test]
    fn prop_deep_merge_into_empty_reproduces_source(s in map_shape()) {
        let source = s.build();
        let merged = deep_merge(&Value::from(Object::new()), &source);
        prop_assert_eq!(merged, source);
    }
}
