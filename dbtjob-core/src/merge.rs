//! Deep merge of nested configs

use serde_json::{Map, Value};

/// Merges `override_map` over `base`, returning a new map
///
/// Keys holding objects on both sides are merged recursively. For every other
/// key the override value replaces the base value outright: arrays are not
/// concatenated and a type mismatch is not an error. Neither input is touched.
pub fn deep_merge(base: &Map<String, Value>, override_map: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();

    for (key, override_value) in override_map {
        let value = match (merged.get(key), override_value) {
            (Some(Value::Object(base_obj)), Value::Object(override_obj)) => {
                Value::Object(deep_merge(base_obj, override_obj))
            }
            _ => override_value.clone(),
        };
        merged.insert(key.clone(), value);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_override_wins_on_scalars() {
        let base = obj(json!({"foundations-table-name": "shared.default", "retries": 3}));
        let over = obj(json!({"foundations-table-name": "jobs.spark_x", "platformTag": "spark"}));

        let merged = deep_merge(&base, &over);

        assert_eq!(
            Value::Object(merged),
            json!({
                "foundations-table-name": "jobs.spark_x",
                "retries": 3,
                "platformTag": "spark"
            })
        );
    }

    #[test]
    fn test_nested_objects_merge_recursively() {
        let base = obj(json!({"spark": {"executors": 4, "conf": {"a": 1, "b": 2}}}));
        let over = obj(json!({"spark": {"conf": {"b": 3}}}));

        let merged = deep_merge(&base, &over);

        assert_eq!(
            Value::Object(merged),
            json!({"spark": {"executors": 4, "conf": {"a": 1, "b": 3}}})
        );
    }

    #[test]
    fn test_arrays_are_replaced_not_concatenated() {
        let base = obj(json!({"tags": ["a", "b"]}));
        let over = obj(json!({"tags": ["c"]}));

        assert_eq!(Value::Object(deep_merge(&base, &over)), json!({"tags": ["c"]}));
    }

    #[test]
    fn test_type_mismatch_replaces() {
        let base = obj(json!({"x": {"nested": true}, "y": [1]}));
        let over = obj(json!({"x": [1, 2], "y": {"now": "object"}}));

        assert_eq!(
            Value::Object(deep_merge(&base, &over)),
            json!({"x": [1, 2], "y": {"now": "object"}})
        );
    }

    #[test]
    fn test_empty_sides() {
        let some = obj(json!({"a": {"b": 1}}));
        let empty = Map::new();

        assert_eq!(deep_merge(&empty, &some), some);
        assert_eq!(deep_merge(&some, &empty), some);
    }

    #[test]
    fn test_inputs_untouched() {
        let base = obj(json!({"a": {"b": 1, "c": [1, 2]}, "d": "x"}));
        let over = obj(json!({"a": {"b": 2, "c": [3]}, "d": {"e": 1}}));
        let base_before = base.clone();
        let over_before = over.clone();

        let _ = deep_merge(&base, &over);

        assert_eq!(base, base_before);
        assert_eq!(over, over_before);
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            "[a-z]{0,4}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
                prop::collection::btree_map("[a-d]", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn arb_map() -> impl Strategy<Value = Map<String, Value>> {
        prop::collection::btree_map("[a-d]", arb_value(), 0..5).prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_merge_with_self_is_identity(x in arb_map()) {
            prop_assert_eq!(deep_merge(&x, &x), x);
        }

        #[test]
        fn prop_merge_does_not_mutate(base in arb_map(), over in arb_map()) {
            let base_before = base.clone();
            let over_before = over.clone();
            let _ = deep_merge(&base, &over);
            prop_assert_eq!(base, base_before);
            prop_assert_eq!(over, over_before);
        }

        #[test]
        fn prop_merge_key_laws(base in arb_map(), over in arb_map()) {
            let merged = deep_merge(&base, &over);

            for (key, over_value) in &over {
                match (base.get(key), over_value) {
                    (Some(Value::Object(b)), Value::Object(o)) => {
                        prop_assert_eq!(&merged[key], &Value::Object(deep_merge(b, o)));
                    }
                    _ => prop_assert_eq!(&merged[key], over_value),
                }
            }
            for (key, base_value) in &base {
                if !over.contains_key(key) {
                    prop_assert_eq!(&merged[key], base_value);
                }
            }
        }
    }
}
