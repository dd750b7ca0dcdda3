/* src/holder/slot.rs */

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use arc_swap::ArcSwapOption;

use super::{Entry, HoldError, Meta};
#[cfg(feature = "events")]
use super::HoldEvent;

/// Default event channel capacity.
#[cfg(feature = "events")]
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Single-value holder with atomic replacement.
///
/// Reads are wait-free loads of an `Arc`; a replacement publishes a complete
/// new [`Entry`] in one pointer swap, so readers see either the previous or
/// the next value, never a mix of both.
pub struct Holder<T> {
	inner: ArcSwapOption<Entry<T>>,
	version: AtomicU64,
	#[cfg(feature = "events")]
	events: tokio::sync::broadcast::Sender<HoldEvent<T>>,
}

impl<T> Holder<T>
where
	T: Send + Sync,
{
	/// Creates an empty holder.
	pub fn new() -> Self {
		Self {
			inner: ArcSwapOption::empty(),
			version: AtomicU64::new(0),
			#[cfg(feature = "events")]
			events: tokio::sync::broadcast::channel(DEFAULT_EVENT_CAPACITY).0,
		}
	}

	/// Creates an empty holder with custom event channel capacity.
	///
	/// Note: Events may be dropped if subscribers process slower than
	/// the write rate and the channel fills up.
	#[cfg(feature = "events")]
	pub fn with_event_capacity(capacity: usize) -> Self {
		Self {
			inner: ArcSwapOption::empty(),
			version: AtomicU64::new(0),
			events: tokio::sync::broadcast::channel(capacity).0,
		}
	}

	/// Returns the current value. Wait-free.
	pub fn get(&self) -> Result<Arc<T>, HoldError> {
		match &*self.inner.load() {
			Some(entry) => Ok(Arc::clone(&entry.value)),
			None => Err(HoldError::NoSnapshotYet),
		}
	}

	/// Returns the current entry (value + metadata).
	pub fn entry(&self) -> Option<Arc<Entry<T>>> {
		self.inner.load_full()
	}

	/// Returns metadata of the current value.
	pub fn meta(&self) -> Option<Meta> {
		(*self.inner.load()).as_ref().map(|entry| entry.meta.clone())
	}

	/// Returns true once a value has been stored.
	pub fn is_loaded(&self) -> bool {
		(*self.inner.load()).is_some()
	}

	/// Atomically replaces the held value and returns it.
	///
	/// # Notes
	///
	/// Versions are allocated before the swap. Callers that replace from
	/// several threads at once must serialize their calls if they need the
	/// stored version order to match the swap order.
	pub fn replace(&self, value: T, namespace: &str) -> Arc<T> {
		let value = Arc::new(value);
		let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
		let meta = Meta {
			namespace: namespace.to_string(),
			loaded_at: Instant::now(),
			version,
		};

		let old = self.inner.swap(Some(Arc::new(Entry {
			value: Arc::clone(&value),
			meta: meta.clone(),
		})));

		#[cfg(feature = "events")]
		{
			let event = match old {
				Some(old) => HoldEvent::Updated {
					old: Arc::clone(&old.value),
					new: Arc::clone(&value),
					meta,
				},
				None => HoldEvent::Loaded {
					value: Arc::clone(&value),
					meta,
				},
			};
			let _ = self.events.send(event);
		}

		#[cfg(not(feature = "events"))]
		{
			let _ = (old, meta);
		}

		value
	}

	/// Records a failed reload. The held value is left untouched.
	#[cfg(feature = "events")]
	pub fn report_failure(&self, namespace: &str, reason: impl Into<String>) {
		let _ = self.events.send(HoldEvent::Failed {
			namespace: namespace.to_string(),
			reason: reason.into(),
		});
	}

	/// Subscribes to holder events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<HoldEvent<T>> {
		self.events.subscribe()
	}
}

impl<T> Default for Holder<T>
where
	T: Send + Sync,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T> std::fmt::Debug for Holder<T>
where
	T: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Holder")
			.field("entry", &self.inner.load_full())
			.field("version", &self.version.load(Ordering::Relaxed))
			.finish_non_exhaustive()
	}
}
