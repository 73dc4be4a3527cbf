/// Builds a [`Value`](crate::Value) graph from a JSON-like literal.
///
/// Every `[...]` and `{...}` creates a fresh composite. Any other token tree
/// goes through `Value::from`, so existing handles can be spliced in by
/// wrapping them in parentheses, which is how sharing is expressed:
///
/// ```rust
/// use serde_resurrect::graph;
///
/// let shared = graph!({"name": "shared"});
/// let pair = graph!({"left": (shared.clone()), "right": (shared)});
/// let pair = pair.as_object().unwrap();
/// assert_eq!(pair.get("left").unwrap(), pair.get("right").unwrap());
/// ```
#[macro_export]
macro_rules! graph {
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
        $crate::Value::from(vec![$($crate::graph!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Object::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let object = $crate::Object::new();
        $(
            object.set($key, $crate::graph!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
