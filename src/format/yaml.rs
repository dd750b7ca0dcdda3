/* src/format/yaml.rs */

use super::{Format, FormatError};
use crate::store::Snapshot;

/// YAML encoder using `serde_yaml`. Namespaces become a top-level mapping.
pub struct Yaml;

impl Format for Yaml {
	fn name(&self) -> &'static str {
		"yaml"
	}

	fn extensions(&self) -> &'static [&'static str] {
		&["yaml", "yml"]
	}

	fn encode_snapshot(&self, snapshot: &Snapshot) -> Result<String, FormatError> {
		serde_yaml::to_string(snapshot).map_err(|e| FormatError::Encode {
			format: self.name(),
			reason: e.to_string(),
		})
	}
}
