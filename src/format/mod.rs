/* src/format/mod.rs */

//!
//! Snapshot serializers.
//!
//! A namespace snapshot is encoded as a whole document; a single-key read is
//! emitted as its bare coerced text in every format.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::extract::Extracted;
use crate::store::Snapshot;

mod coerce;
mod error;
mod json;
mod properties;
#[cfg(feature = "yaml")]
mod yaml;

pub use coerce::coerce;
pub use error::FormatError;
pub use json::Json;
pub use properties::Properties;
#[cfg(feature = "yaml")]
pub use yaml::Yaml;

/// Abstract encoder that turns an extracted snapshot into text.
pub trait Format: Send + Sync {
	/// Canonical tag of this format.
	fn name(&self) -> &'static str;

	/// List of namespace suffixes that select this format.
	fn extensions(&self) -> &'static [&'static str];

	/// Encodes a full namespace snapshot as one document.
	fn encode_snapshot(&self, snapshot: &Snapshot) -> Result<String, FormatError>;

	/// Encodes a single value read by key. Unwrapped in every format.
	fn encode_scalar(&self, value: &Value) -> Result<String, FormatError> {
		Ok(coerce(value))
	}

	/// Encodes whatever the extractor produced.
	fn encode(&self, extracted: &Extracted) -> Result<String, FormatError> {
		match extracted {
			Extracted::Namespace(snapshot) => self.encode_snapshot(snapshot),
			Extracted::Key(value) => self.encode_scalar(value),
		}
	}
}

/// An enum wrapper for all supported formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnyFormat {
	#[default]
	Json,
	#[cfg(feature = "yaml")]
	Yaml,
	Properties,
}

impl AnyFormat {
	/// All formats compiled into this build.
	pub const ALL: &'static [AnyFormat] = &[
		AnyFormat::Json,
		#[cfg(feature = "yaml")]
		AnyFormat::Yaml,
		AnyFormat::Properties,
	];

	/// Infers the format from a namespace suffix such as `application.yaml`.
	///
	/// Returns `None` when the namespace carries no known suffix.
	pub fn from_namespace(namespace: &str) -> Option<Self> {
		let (_, ext) = namespace.rsplit_once('.')?;
		let ext = ext.to_ascii_lowercase();
		Self::ALL
			.iter()
			.copied()
			.find(|format| format.extensions().contains(&ext.as_str()))
	}
}

impl FromStr for AnyFormat {
	type Err = FormatError;

	fn from_str(tag: &str) -> Result<Self, Self::Err> {
		let lowered = tag.trim().to_ascii_lowercase();
		Self::ALL
			.iter()
			.copied()
			.find(|format| format.name() == lowered || format.extensions().contains(&lowered.as_str()))
			.ok_or_else(|| FormatError::Unsupported(tag.to_string()))
	}
}

impl fmt::Display for AnyFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl Format for AnyFormat {
	fn name(&self) -> &'static str {
		match self {
			Self::Json => Json.name(),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.name(),
			Self::Properties => Properties.name(),
		}
	}

	fn extensions(&self) -> &'static [&'static str] {
		match self {
			Self::Json => Json.extensions(),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.extensions(),
			Self::Properties => Properties.extensions(),
		}
	}

	fn encode_snapshot(&self, snapshot: &Snapshot) -> Result<String, FormatError> {
		match self {
			Self::Json => Json.encode_snapshot(snapshot),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.encode_snapshot(snapshot),
			Self::Properties => Properties.encode_snapshot(snapshot),
		}
	}
}

/// Serializes an extraction result with the given format.
pub fn serialize(extracted: &Extracted, format: AnyFormat) -> Result<String, FormatError> {
	format.encode(extracted)
}
