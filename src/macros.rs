/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects are plain (base prototype); keys must be string literals.
/// Any other expression goes through `Value::from`.
///
/// ```rust
/// use valuekit::value;
///
/// let user = value!({
///     "name": "Alice",
///     "tags": ["admin", "dev"],
///     "manager": null
/// });
/// assert_eq!(user.get("tags").get(1).as_str(), Some("dev"));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (undefined) => {
        $crate::Value::Undefined
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::from(vec![$($crate::value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Object::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let object = $crate::Object::new();
        $(
            object.set($key, $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
