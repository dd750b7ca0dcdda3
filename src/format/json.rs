/* src/format/json.rs */

use super::{Format, FormatError};
use crate::store::Snapshot;

/// JSON encoder using `serde_json`. Namespaces become a single object.
pub struct Json;

impl Format for Json {
	fn name(&self) -> &'static str {
		"json"
	}

	fn extensions(&self) -> &'static [&'static str] {
		&["json"]
	}

	fn encode_snapshot(&self, snapshot: &Snapshot) -> Result<String, FormatError> {
		serde_json::to_string(snapshot).map_err(|e| FormatError::Encode {
			format: self.name(),
			reason: e.to_string(),
		})
	}
}
