//! Layer merge logic
//!
//! - Tables: merged key by key
//! - Arrays and scalars: the later layer replaces the earlier one
//! - Null: treated as "not set", the earlier value is kept

use serde_json::Value;

/// Merge `overlay` into `base` in place.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        if !value.is_null() {
                            base_map.insert(key, value);
                        }
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Merge layers in precedence order (first is lowest).
pub fn merge_layers(layers: impl IntoIterator<Item = Value>) -> Value {
    let mut merged = Value::Object(serde_json::Map::new());
    for layer in layers {
        deep_merge(&mut merged, layer);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_later_layer_wins() {
        let merged = merge_layers([
            json!({"expose_server_routes": true, "production_mode": true}),
            json!({"production_mode": false}),
        ]);
        assert_eq!(merged["expose_server_routes"], true);
        assert_eq!(merged["production_mode"], false);
    }

    #[test]
    fn test_null_is_not_set() {
        let merged = merge_layers([
            json!({"menu_population": "auto"}),
            json!({"menu_population": null, "frontend_dir": null}),
        ]);
        assert_eq!(merged["menu_population"], "auto");
        assert!(merged.get("frontend_dir").is_none());
    }

    #[test]
    fn test_nested_tables_merge() {
        let mut base = json!({"dev": {"frontend_dir": "frontend", "watch": true}});
        deep_merge(&mut base, json!({"dev": {"frontend_dir": "web"}}));
        assert_eq!(base["dev"]["frontend_dir"], "web");
        assert_eq!(base["dev"]["watch"], true);
    }

    #[test]
    fn test_arrays_replace() {
        let mut base = json!({"roles": ["a", "b"]});
        deep_merge(&mut base, json!({"roles": ["c"]}));
        assert_eq!(base["roles"], json!(["c"]));
    }
}
