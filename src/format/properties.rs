/* src/format/properties.rs */

use super::{Format, FormatError, coerce};
use crate::store::Snapshot;

/// Line-oriented `key=value` encoder.
///
/// Values go through [`coerce`], so nested data is written as JSON text.
/// Keys and values are not escaped.
pub struct Properties;

impl Format for Properties {
	fn name(&self) -> &'static str {
		"properties"
	}

	fn extensions(&self) -> &'static [&'static str] {
		&["properties"]
	}

	fn encode_snapshot(&self, snapshot: &Snapshot) -> Result<String, FormatError> {
		let mut out = String::new();
		for (key, value) in snapshot {
			out.push_str(key);
			out.push('=');
			out.push_str(&coerce(value));
			out.push('\n');
		}
		Ok(out)
	}
}
