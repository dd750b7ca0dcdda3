/* src/listener.rs */

//!
//! Ordered registry of reload listeners.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;

/// Callback invoked after every successful reload.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Token returned by registration; pass it back to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Listeners in registration order.
///
/// Updates copy the list and swap it in, so dispatch iterates a stable
/// snapshot and a listener may register further listeners while running.
/// Those run from the next dispatch on.
pub struct Listeners {
	list: ArcSwap<Vec<(ListenerId, Listener)>>,
	next_id: AtomicU64,
}

impl Listeners {
	pub fn new() -> Self {
		Self {
			list: ArcSwap::from_pointee(Vec::new()),
			next_id: AtomicU64::new(0),
		}
	}

	/// Appends a listener.
	pub fn add(&self, listener: Listener) -> ListenerId {
		let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
		self.list.rcu(|list| {
			let mut new_list = (**list).clone();
			new_list.push((id, Arc::clone(&listener)));
			new_list
		});
		id
	}

	/// Removes a listener. Returns false if it was not registered.
	pub fn remove(&self, id: ListenerId) -> bool {
		let previous = self.list.rcu(|list| {
			let mut new_list = (**list).clone();
			new_list.retain(|(registered, _)| *registered != id);
			new_list
		});
		previous.iter().any(|(registered, _)| *registered == id)
	}

	pub fn len(&self) -> usize {
		self.list.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.list.load().is_empty()
	}

	/// Invokes every listener in registration order and returns how many
	/// completed. A panicking listener is logged and skipped.
	pub fn dispatch(&self) -> usize {
		let list = self.list.load_full();
		let mut completed = 0;
		for (id, listener) in list.iter() {
			match catch_unwind(AssertUnwindSafe(|| listener())) {
				Ok(()) => completed += 1,
				Err(_) => tracing::error!(listener = ?id, "Listener panicked during dispatch"),
			}
		}
		completed
	}
}

impl Default for Listeners {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Listeners {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Listeners").field("len", &self.len()).finish()
	}
}
