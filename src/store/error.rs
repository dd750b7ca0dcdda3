/* src/store/error.rs */

/// Errors reported by a [`ConfigStore`](super::ConfigStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	/// The requested key is absent from the namespace.
	#[error("key not found: {key} (namespace {namespace})")]
	KeyNotFound { namespace: String, key: String },

	/// The store cannot serve reads right now.
	#[error("upstream unavailable for namespace {namespace}: {reason}")]
	Unavailable { namespace: String, reason: String },
}
