pub mod clock;

pub use clock::Clock;

/// Applies an RFC 7386 JSON merge patch to `target`.
///
/// Object members merge recursively, `null` members delete the key, anything else replaces the
/// target wholesale.
pub fn merge_patch(target: &mut serde_json::Value, patch: &serde_json::Value) {
    use serde_json::{Map, Value};

    let Value::Object(patch) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    if let Value::Object(target) = target {
        for (key, value) in patch {
            if value.is_null() {
                target.remove(key);
            } else {
                merge_patch(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}
