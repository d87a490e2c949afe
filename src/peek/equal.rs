//! Deep structural equality over JSON values.
//!
//! Reference identity never matters here: two values are equal when they
//! hold the same content. Numbers compare by numeric value, so `1` and
//! `1.0` are equal. Objects compare independently of key order. Arrays and
//! objects are never equal to each other.
//!
//! `serde_json::Value` is a tree, so cyclic inputs cannot be expressed and
//! recursion always terminates.

use serde_json::{Number, Value};

/// Returns `true` if `a` and `b` are structurally equal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| deep_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, l)| y.get(key).is_some_and(|r| deep_equal(l, r)))
        }
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(l), Some(r)) = (x.as_i64(), y.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (x.as_u64(), y.as_u64()) {
        return l == r;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitives() {
        assert!(deep_equal(&json!(null), &json!(null)));
        assert!(deep_equal(&json!(true), &json!(true)));
        assert!(deep_equal(&json!("x"), &json!("x")));
        assert!(!deep_equal(&json!("x"), &json!("y")));
        assert!(!deep_equal(&json!(0), &json!(false)));
        assert!(!deep_equal(&json!(null), &json!(0)));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(deep_equal(&json!(1), &json!(1.0)));
        assert!(deep_equal(&json!(-3), &json!(-3.0)));
        assert!(deep_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!deep_equal(&json!(1), &json!(2)));
        assert!(!deep_equal(&json!(0.1), &json!(0.2)));
    }

    #[test]
    fn test_nested_objects_ignore_key_order() {
        let a = json!({ "a": 1, "b": { "x": 1, "y": [1, 2] } });
        let b = json!({ "b": { "y": [1, 2], "x": 1 }, "a": 1 });
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn test_nested_difference_is_found() {
        let a = json!({ "b": { "x": 1, "y": [1, 2] } });
        let b = json!({ "b": { "x": 1, "y": [1, 3] } });
        assert!(!deep_equal(&a, &b));
    }

    #[test]
    fn test_arrays_are_ordered() {
        assert!(deep_equal(&json!([1, 2, 3]), &json!([1, 2, 3])));
        assert!(!deep_equal(&json!([1, 2, 3]), &json!([3, 2, 1])));
        assert!(!deep_equal(&json!([1, 2]), &json!([1, 2, 3])));
    }

    #[test]
    fn test_array_never_equals_object() {
        assert!(!deep_equal(&json!([]), &json!({})));
        assert!(!deep_equal(&json!({ "0": 1 }), &json!([1])));
    }

    #[test]
    fn test_null_member_differs_from_missing_member() {
        assert!(!deep_equal(&json!({ "a": null }), &json!({})));
        assert!(!deep_equal(&json!({ "a": null }), &json!({ "b": null })));
    }
}
