/* src/store/mod.rs */

//!
//! Boundary to the upstream key-value configuration store.
//!
//! Transport, polling and local backup belong to the store implementation.
//! This crate only reads from the store's cache and listens for its
//! payload-free change notifications.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

mod error;
mod memory;
mod options;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use options::ClientOptions;

/// Point-in-time read-out of a namespace, ordered by key.
pub type Snapshot = BTreeMap<String, Value>;

/// Payload-free change notification callback.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Identifies a change registration so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub u64);

/// An upstream configuration store with a local cache per namespace.
pub trait ConfigStore: Send + Sync {
	/// Reads one key from the namespace cache.
	fn get(&self, namespace: &str, key: &str) -> Result<Value, StoreError>;

	/// Returns every key/value pair currently visible in the namespace.
	fn enumerate(&self, namespace: &str) -> Result<Snapshot, StoreError>;

	/// Registers a callback invoked whenever any value in the namespace may
	/// have changed.
	fn on_change(&self, namespace: &str, callback: ChangeCallback) -> Result<WatchId, StoreError>;

	/// Releases a registration made with [`on_change`](Self::on_change).
	fn cancel(&self, _namespace: &str, _id: WatchId) {}
}

/// Builds a store handle from client settings.
pub trait Connect {
	fn connect(&self, options: &ClientOptions) -> Result<Arc<dyn ConfigStore>, StoreError>;
}

impl<F> Connect for F
where
	F: Fn(&ClientOptions) -> Result<Arc<dyn ConfigStore>, StoreError>,
{
	fn connect(&self, options: &ClientOptions) -> Result<Arc<dyn ConfigStore>, StoreError> {
		self(options)
	}
}
