/* src/holder/entry.rs */

use std::sync::Arc;

use super::Meta;

/// A held value together with its metadata.
#[derive(Debug, Clone)]
pub struct Entry<T> {
	/// The value wrapped in Arc for cheap sharing with readers.
	pub value: Arc<T>,
	/// Metadata about this entry.
	pub meta: Meta,
}
