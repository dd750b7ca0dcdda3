/* src/subscriber/live.rs */

//!
//! Namespace subscriber with live reloading.

use std::sync::Arc;

use tracing::{debug, info};

use super::dispatch::{self, DispatchTask};
use super::inner::Core;
use super::{Delivery, SubscribeError, SubscriberConf};
use crate::format::AnyFormat;
use crate::holder::Meta;
use crate::listener::ListenerId;
use crate::store::{ConfigStore, Connect, WatchId};

/// Serves the latest serialized form of an upstream namespace (or one key
/// of it) and notifies listeners whenever it is reloaded.
///
/// A `Subscriber` only exists after its first load succeeded, so
/// [`value`](Self::value) always has something to return. Dropping it
/// releases the store registration and stops the dispatch task.
pub struct Subscriber {
	core: Arc<Core>,
	watch: WatchId,
	delivery: Delivery,
	_dispatch: Option<DispatchTask>,
}

impl Subscriber {
	/// Validates `conf`, registers for change notifications on `store` and
	/// performs the first load.
	///
	/// Fails if the config is invalid or the first load fails; in the latter
	/// case the store registration is released before returning.
	pub fn new(conf: &SubscriberConf, store: Arc<dyn ConfigStore>) -> Result<Self, SubscribeError> {
		conf.check()?;
		Self::new_checked(conf, store)
	}

	/// Builds the store handle through `connector` from
	/// [`SubscriberConf::client_options`], then behaves like [`new`](Self::new).
	///
	/// An invalid config is rejected before the connector is called.
	pub fn connect<C>(conf: &SubscriberConf, connector: &C) -> Result<Self, SubscribeError>
	where
		C: Connect + ?Sized,
	{
		conf.check()?;
		let store = connector.connect(&conf.client_options())?;
		Self::new_checked(conf, store)
	}

	fn new_checked(conf: &SubscriberConf, store: Arc<dyn ConfigStore>) -> Result<Self, SubscribeError> {
		let format = conf.resolve_format()?;
		let namespace = conf.namespace().to_string();
		let key = conf.key().map(str::to_string);

		let core = Arc::new(Core::new(store, namespace, key, format));
		let (callback, dispatch_task, delivery) = dispatch::attach(&core, conf.delivery);
		let watch = core.store.on_change(&core.namespace, callback)?;

		if let Err(e) = core.load() {
			core.store.cancel(&core.namespace, watch);
			return Err(e);
		}

		info!(
			app_id = %conf.app_id,
			cluster = %conf.cluster(),
			namespace = %core.namespace,
			key = ?core.key,
			format = %core.format,
			?delivery,
			"Subscribed to config namespace"
		);

		Ok(Self {
			core,
			watch,
			delivery,
			_dispatch: dispatch_task,
		})
	}

	/// Returns the current serialized value.
	pub fn value(&self) -> Result<Arc<String>, SubscribeError> {
		Ok(self.core.holder.get()?)
	}

	/// Registers a callback run after every successful reload, in
	/// registration order.
	pub fn add_listener<F>(&self, listener: F) -> ListenerId
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.core.listeners.add(Arc::new(listener))
	}

	/// Removes a listener. Returns false if it was not registered.
	pub fn remove_listener(&self, id: ListenerId) -> bool {
		self.core.listeners.remove(id)
	}

	/// Number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.core.listeners.len()
	}

	/// Reloads now on the calling thread and runs the listeners.
	///
	/// Unlike a notification-driven reload, the failure is returned. The
	/// last good value is kept either way.
	pub fn reload(&self) -> Result<(), SubscribeError> {
		self.core.reload()
	}

	/// Metadata of the current value.
	pub fn meta(&self) -> Option<Meta> {
		self.core.holder.meta()
	}

	pub fn namespace(&self) -> &str {
		&self.core.namespace
	}

	/// Selected key, or `None` in namespace mode.
	pub fn key(&self) -> Option<&str> {
		self.core.key.as_deref()
	}

	pub fn format(&self) -> AnyFormat {
		self.core.format
	}

	/// Delivery mode in effect. Queued delivery falls back to inline when no
	/// tokio runtime was available at construction.
	pub fn delivery(&self) -> Delivery {
		self.delivery
	}

	/// Subscribes to holder events, including absorbed reload failures.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<crate::holder::HoldEvent<String>> {
		self.core.holder.subscribe()
	}
}

impl Drop for Subscriber {
	fn drop(&mut self) {
		self.core.store.cancel(&self.core.namespace, self.watch);
		debug!(namespace = %self.core.namespace, "Unsubscribed from config namespace");
	}
}

impl std::fmt::Debug for Subscriber {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscriber")
			.field("namespace", &self.core.namespace)
			.field("key", &self.core.key)
			.field("format", &self.core.format)
			.field("delivery", &self.delivery)
			.field("watch", &self.watch)
			.field("listeners", &self.core.listeners.len())
			.finish_non_exhaustive()
	}
}
