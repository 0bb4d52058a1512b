/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Array elements and object values may be arbitrary expressions
/// (`-1`, `count + 1`, `name.clone()`); they go through
/// [`to_value`](crate::to_value). Object keys are string literals or a
/// parenthesised expression rendered with `to_string`.
///
/// ```rust
/// use serde_superjson::{value, Value};
///
/// let field = "role";
/// let user = value!({
///     "name": "Alice",
///     "tags": ["admin", "ops"],
///     "offset": -2,
///     (field): "owner",
///     "manager": null,
/// });
/// assert!(matches!(user, Value::Object(_)));
/// assert_eq!(user.get("role"), Some(&Value::from("owner")));
/// ```
#[macro_export]
macro_rules! value {
    // Sequence elements, collected one at a time into `[$done,*]`.
    (@seq [$($done:expr,)*]) => {
        vec![$($done,)*]
    };
    (@seq [$($done:expr,)*] null $($rest:tt)*) => {
        $crate::value!(@seq_sep [$($done,)* $crate::Value::Null,] $($rest)*)
    };
    (@seq [$($done:expr,)*] [$($inner:tt)*] $($rest:tt)*) => {
        $crate::value!(@seq_sep [$($done,)* $crate::value!([$($inner)*]),] $($rest)*)
    };
    (@seq [$($done:expr,)*] {$($inner:tt)*} $($rest:tt)*) => {
        $crate::value!(@seq_sep [$($done,)* $crate::value!({$($inner)*}),] $($rest)*)
    };
    (@seq [$($done:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::value!(@seq [$($done,)* $crate::value!($next),] $($rest)*)
    };
    (@seq [$($done:expr,)*] $last:expr) => {
        $crate::value!(@seq [$($done,)* $crate::value!($last),])
    };
    (@seq_sep [$($done:expr,)*]) => {
        $crate::value!(@seq [$($done,)*])
    };
    (@seq_sep [$($done:expr,)*] , $($rest:tt)*) => {
        $crate::value!(@seq [$($done,)*] $($rest)*)
    };

    // Object entries, inserted into `$map` as they are read.
    (@map $map:ident) => {};
    (@map $map:ident $key:literal : $($rest:tt)*) => {
        $crate::value!(@entry $map [$key] $($rest)*);
    };
    (@map $map:ident ($key:expr) : $($rest:tt)*) => {
        $crate::value!(@entry $map [$key] $($rest)*);
    };
    (@entry $map:ident [$key:expr] null $($rest:tt)*) => {
        let _ = $map.insert(::std::string::ToString::to_string(&$key), $crate::Value::Null);
        $crate::value!(@map_sep $map $($rest)*);
    };
    (@entry $map:ident [$key:expr] [$($inner:tt)*] $($rest:tt)*) => {
        let _ = $map.insert(::std::string::ToString::to_string(&$key), $crate::value!([$($inner)*]));
        $crate::value!(@map_sep $map $($rest)*);
    };
    (@entry $map:ident [$key:expr] {$($inner:tt)*} $($rest:tt)*) => {
        let _ = $map.insert(::std::string::ToString::to_string(&$key), $crate::value!({$($inner)*}));
        $crate::value!(@map_sep $map $($rest)*);
    };
    (@entry $map:ident [$key:expr] $item:expr, $($rest:tt)*) => {
        let _ = $map.insert(::std::string::ToString::to_string(&$key), $crate::value!($item));
        $crate::value!(@map $map $($rest)*);
    };
    (@entry $map:ident [$key:expr] $item:expr) => {
        let _ = $map.insert(::std::string::ToString::to_string(&$key), $crate::value!($item));
    };
    (@map_sep $map:ident) => {};
    (@map_sep $map:ident , $($rest:tt)*) => {
        $crate::value!(@map $map $($rest)*);
    };

    (null) => {
        $crate::Value::Null
    };
    ([ $($items:tt)* ]) => {
        $crate::Value::Array($crate::value!(@seq [] $($items)*))
    };
    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };
    ({ $($entries:tt)* }) => {{
        let mut map = $crate::Map::new();
        $crate::value!(@map map $($entries)*);
        $crate::Value::Object(map)
    }};
    // Scalars and anything serde can turn into a tree; a failed
    // conversion yields null.
    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn test_value_macro_primitives() {
        assert_eq!(value!(null), Value::Null);
        assert_eq!(value!(true), Value::Bool(true));
        assert_eq!(value!(false), Value::Bool(false));
        assert_eq!(value!(42), Value::Number(Number::Integer(42)));
        assert_eq!(value!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_value_macro_containers() {
        assert_eq!(value!([]), Value::Array(vec![]));
        assert_eq!(value!({}), Value::Object(Map::new()));

        let obj = value!({
            "dates": ["2024-01-01T00:00:00.000Z", "x"],
            "count": 3
        });
        let dates = obj.get("dates").and_then(Value::as_array).unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(obj.get("count"), Some(&Value::Number(Number::Integer(3))));
    }

    #[test]
    fn test_value_macro_expression_elements() {
        let base = 4;
        assert_eq!(
            value!([-1, base + 1, null, [true], {}]),
            Value::Array(vec![
                Value::from(-1),
                Value::from(5),
                Value::Null,
                Value::Array(vec![Value::Bool(true)]),
                Value::Object(Map::new()),
            ])
        );
    }

    #[test]
    fn test_value_macro_expression_keys() {
        let key = String::from("dynamic");
        let obj = value!({ (key): 1, (0): "zero", "fixed": null, });
        let keys: Vec<_> = obj.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["dynamic", "0", "fixed"]);
        assert_eq!(obj.get("0"), Some(&Value::from("zero")));
    }
}
