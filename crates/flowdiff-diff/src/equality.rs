//! Structural equality over JSON values.
//!
//! This is the single answer to "did anything change" for opaque node data,
//! settings, and variables. The walk is explicit so that the rules below do
//! not depend on any particular `PartialEq` implementation:
//!
//! - primitives are equal only to primitives of the same kind and value
//!   (numbers compare by numeric value, so `1` equals `1.0`);
//! - `null` equals only `null`, and a missing map key never equals `null`;
//! - lists compare by length and then index by index;
//! - maps compare by exact key set and then key by key.

use serde_json::{Map, Number, Value};

/// Returns `true` if `a` and `b` are structurally equal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| deep_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => map_equal(x, y),
        _ => false,
    }
}

/// Returns `true` if both maps have the same key set and equal values.
pub fn map_equal(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| deep_equal(value, other)))
}

/// Equality for fields that may be absent: an absent field equals only
/// another absent field, so `None` never equals `Some(Value::Null)`.
pub fn optional_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => deep_equal(x, y),
        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identical_primitives() {
        assert!(deep_equal(&json!(1), &json!(1)));
        assert!(deep_equal(&json!("a"), &json!("a")));
        assert!(deep_equal(&json!(true), &json!(true)));
        assert!(!deep_equal(&json!(true), &json!(false)));
    }

    #[test]
    fn kind_mismatch_is_unequal() {
        assert!(!deep_equal(&json!(1), &json!("1")));
        assert!(!deep_equal(&json!(0), &json!(false)));
        assert!(!deep_equal(&json!([]), &json!({})));
        assert!(!deep_equal(&json!(["a"]), &json!({"0": "a"})));
    }

    #[test]
    fn null_only_equals_null() {
        assert!(deep_equal(&Value::Null, &Value::Null));
        assert!(!deep_equal(&Value::Null, &json!(0)));
        assert!(!deep_equal(&Value::Null, &json!("")));
        assert!(!deep_equal(&json!({}), &Value::Null));
    }

    #[test]
    fn missing_key_is_not_null() {
        assert!(!deep_equal(&json!({"a": null}), &json!({})));
        assert!(!deep_equal(&json!({}), &json!({"a": null})));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(deep_equal(&json!(1), &json!(1.0)));
        assert!(deep_equal(&json!(-3), &json!(-3)));
        assert!(!deep_equal(&json!(1), &json!(1.5)));
        assert!(deep_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!deep_equal(&json!(-1), &json!(u64::MAX)));
    }

    #[test]
    fn absent_is_not_null() {
        assert!(optional_equal(None, None));
        assert!(optional_equal(Some(&Value::Null), Some(&Value::Null)));
        assert!(!optional_equal(None, Some(&Value::Null)));
        assert!(!optional_equal(Some(&json!({})), None));
        assert!(optional_equal(Some(&json!({"a": 1})), Some(&json!({"a": 1.0}))));
    }

    #[test]
    fn lists_compare_by_index() {
        assert!(deep_equal(&json!([1, 2, 3]), &json!([1, 2, 3])));
        assert!(!deep_equal(&json!([1, 2, 3]), &json!([3, 2, 1])));
        assert!(!deep_equal(&json!([1, 2]), &json!([1, 2, 3])));
    }

    #[test]
    fn maps_require_same_keys() {
        assert!(deep_equal(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!deep_equal(&json!({"a": 1, "c": 2}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn nested_difference_detected() {
        let a = json!({"vars": [{"name": "token", "type": "string"}]});
        let b = json!({"vars": [{"name": "token", "type": "secret"}]});
        assert!(!deep_equal(&a, &b));
        assert!(deep_equal(&a, &a.clone()));
    }
}
