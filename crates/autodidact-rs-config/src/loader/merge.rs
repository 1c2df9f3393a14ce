//! Layer merging.

use serde_json::Value;

/// Fold `overlay` into `base`.
///
/// Objects merge key by key; any other overlay value (arrays included)
/// replaces the base value wholesale.
pub(super) fn merge_json_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_json_values(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
