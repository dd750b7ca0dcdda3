/* src/store/memory.rs */

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use arc_swap::ArcSwap;
use serde_json::Value;

use super::{ChangeCallback, ConfigStore, Snapshot, StoreError, WatchId};

#[derive(Clone)]
struct Watch {
	id: WatchId,
	namespace: String,
	callback: ChangeCallback,
}

/// An in-process store useful for testing and embedded environments.
///
/// Mutations never notify on their own: call [`notify`](Self::notify) or use
/// [`publish`](Self::publish). Callbacks run synchronously on the thread that
/// triggers the notification, in registration order.
pub struct MemoryStore {
	namespaces: ArcSwap<HashMap<String, Arc<Snapshot>>>,
	watchers: ArcSwap<Vec<Watch>>,
	next_id: AtomicU64,
	available: AtomicBool,
}

impl MemoryStore {
	/// Creates a new empty store.
	pub fn new() -> Self {
		Self {
			namespaces: ArcSwap::from_pointee(HashMap::new()),
			watchers: ArcSwap::from_pointee(Vec::new()),
			next_id: AtomicU64::new(0),
			available: AtomicBool::new(true),
		}
	}

	/// Inserts or updates a key without notifying watchers.
	pub fn set(&self, namespace: &str, key: &str, value: impl Into<Value>) {
		let value = value.into();
		self.namespaces.rcu(|map| {
			let mut new_map = (**map).clone();
			let snapshot = new_map.entry(namespace.to_string()).or_default();
			Arc::make_mut(snapshot).insert(key.to_string(), value.clone());
			new_map
		});
	}

	/// Removes a key without notifying watchers.
	pub fn remove(&self, namespace: &str, key: &str) -> Option<Value> {
		let removed: RefCell<Option<Value>> = RefCell::new(None);

		self.namespaces.rcu(|map| {
			let mut new_map = (**map).clone();
			*removed.borrow_mut() = new_map
				.get_mut(namespace)
				.and_then(|snapshot| Arc::make_mut(snapshot).remove(key));
			new_map
		});

		removed.into_inner()
	}

	/// Replaces the whole namespace without notifying watchers.
	pub fn replace(&self, namespace: &str, snapshot: Snapshot) {
		let snapshot = Arc::new(snapshot);
		self.namespaces.rcu(|map| {
			let mut new_map = (**map).clone();
			new_map.insert(namespace.to_string(), Arc::clone(&snapshot));
			new_map
		});
	}

	/// Replaces the whole namespace, then notifies its watchers.
	pub fn publish(&self, namespace: &str, snapshot: Snapshot) -> usize {
		self.replace(namespace, snapshot);
		self.notify(namespace)
	}

	/// Invokes every callback registered for the namespace and returns how
	/// many ran.
	pub fn notify(&self, namespace: &str) -> usize {
		let watchers = self.watchers.load_full();
		let mut fired = 0;
		for watch in watchers.iter().filter(|w| w.namespace == namespace) {
			(watch.callback)();
			fired += 1;
		}
		fired
	}

	/// Toggles availability. While unavailable every read fails with
	/// [`StoreError::Unavailable`].
	pub fn set_available(&self, available: bool) {
		self.available.store(available, Ordering::SeqCst);
	}

	/// Number of live change registrations across all namespaces.
	pub fn watcher_count(&self) -> usize {
		self.watchers.load().len()
	}

	fn check_available(&self, namespace: &str) -> Result<(), StoreError> {
		if self.available.load(Ordering::SeqCst) {
			Ok(())
		} else {
			Err(StoreError::Unavailable {
				namespace: namespace.to_string(),
				reason: "store marked unavailable".to_string(),
			})
		}
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigStore for MemoryStore {
	fn get(&self, namespace: &str, key: &str) -> Result<Value, StoreError> {
		self.check_available(namespace)?;
		let map = self.namespaces.load();
		map.get(namespace)
			.and_then(|snapshot| snapshot.get(key))
			.cloned()
			.ok_or_else(|| StoreError::KeyNotFound {
				namespace: namespace.to_string(),
				key: key.to_string(),
			})
	}

	fn enumerate(&self, namespace: &str) -> Result<Snapshot, StoreError> {
		self.check_available(namespace)?;
		let map = self.namespaces.load();
		Ok(map
			.get(namespace)
			.map(|snapshot| (**snapshot).clone())
			.unwrap_or_default())
	}

	fn on_change(&self, namespace: &str, callback: ChangeCallback) -> Result<WatchId, StoreError> {
		let id = WatchId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
		let watch = Watch {
			id,
			namespace: namespace.to_string(),
			callback,
		};
		self.watchers.rcu(|list| {
			let mut new_list = (**list).clone();
			new_list.push(watch.clone());
			new_list
		});
		Ok(id)
	}

	fn cancel(&self, _namespace: &str, id: WatchId) {
		self.watchers.rcu(|list| {
			let mut new_list = (**list).clone();
			new_list.retain(|w| w.id != id);
			new_list
		});
	}
}

impl std::fmt::Debug for MemoryStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryStore")
			.field("namespaces", &self.namespaces.load().len())
			.field("watchers", &self.watcher_count())
			.field("available", &self.available.load(Ordering::Relaxed))
			.finish()
	}
}
