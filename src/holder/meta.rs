/* src/holder/meta.rs */

use std::time::Instant;

/// Metadata associated with a held value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
	/// Namespace the value was extracted from.
	pub namespace: String,
	/// Timestamp when the value was stored.
	pub loaded_at: Instant,
	/// Version number, starting at 1 and incremented on each replacement.
	pub version: u64,
}
