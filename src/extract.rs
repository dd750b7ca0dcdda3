/* src/extract.rs */

//!
//! Snapshot extraction from the store's local cache.

use serde_json::Value;

use crate::store::{ConfigStore, Snapshot, StoreError};

/// Result of one read of the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
	/// Every key/value pair of the namespace.
	Namespace(Snapshot),
	/// The value of a single selected key.
	Key(Value),
}

/// Reads the namespace, or only `key` when one is selected.
///
/// A missing key is an error; there is no fallback to a default value.
pub fn extract<S>(store: &S, namespace: &str, key: Option<&str>) -> Result<Extracted, StoreError>
where
	S: ConfigStore + ?Sized,
{
	match key {
		Some(key) => store.get(namespace, key).map(Extracted::Key),
		None => store.enumerate(namespace).map(Extracted::Namespace),
	}
}
