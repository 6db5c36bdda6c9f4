//! Deep merge of a stored document over the current defaults.

use serde_json::Value;

// ---

/// Overlay `loaded` on `defaults`.
///
/// Objects merge key by key, recursively. Arrays and scalars from `loaded`
/// replace the default outright. A `null` in `loaded` keeps the default, so a
/// section written as null by an older form still gets its current shape.
pub fn merge_with_defaults(defaults: Value, loaded: Value) -> Value {
    // ---
    match (defaults, loaded) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(&key) {
                    Some(existing) => merge_with_defaults(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (defaults, Value::Null) => defaults,
        (_, loaded) => loaded,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_take_defaults() {
        // ---
        let defaults = json!({"comments": "", "status": "PASS", "nameplate": {"kva": "", "phases": "3"}});
        let loaded = json!({"comments": "ok", "nameplate": {"kva": "1500"}});

        let merged = merge_with_defaults(defaults, loaded);
        assert_eq!(
            merged,
            json!({"comments": "ok", "status": "PASS", "nameplate": {"kva": "1500", "phases": "3"}})
        );
    }

    #[test]
    fn test_arrays_are_replaced_not_merged() {
        // ---
        let defaults = json!({"items": [1, 2, 3]});
        let loaded = json!({"items": [9]});
        assert_eq!(merge_with_defaults(defaults, loaded), json!({"items": [9]}));
    }

    #[test]
    fn test_null_keeps_default() {
        // ---
        let defaults = json!({"turns_ratio": {"secondary_voltage": ""}, "date": null});
        let loaded = json!({"turns_ratio": null, "date": "2025-03-01"});
        assert_eq!(
            merge_with_defaults(defaults, loaded),
            json!({"turns_ratio": {"secondary_voltage": ""}, "date": "2025-03-01"})
        );
    }

    #[test]
    fn test_unknown_keys_survive() {
        // ---
        let merged = merge_with_defaults(json!({"a": 1}), json!({"legacy": true}));
        assert_eq!(merged, json!({"a": 1, "legacy": true}));
    }
}
