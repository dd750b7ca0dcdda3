/* src/format/coerce.rs */

use serde_json::Value;

/// Converts a single value into flat text.
///
/// Null becomes the empty string, strings are emitted as-is, numbers and
/// booleans as their literal text. Mappings and sequences have no flat form,
/// so they fall back to compact JSON.
pub fn coerce(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
	}
}
