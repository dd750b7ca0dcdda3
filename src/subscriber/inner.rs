/* src/subscriber/inner.rs */

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use super::SubscribeError;
use crate::extract::extract;
use crate::format::{AnyFormat, Format};
use crate::holder::Holder;
use crate::listener::Listeners;
use crate::store::ConfigStore;

/// State shared between the subscriber handle and its change callback.
pub(crate) struct Core {
	pub(crate) store: Arc<dyn ConfigStore>,
	pub(crate) namespace: String,
	pub(crate) key: Option<String>,
	pub(crate) format: AnyFormat,
	pub(crate) holder: Holder<String>,
	pub(crate) listeners: Listeners,
	// Serializes extract + swap so versions follow publication order.
	reload_lock: Mutex<()>,
}

impl Core {
	pub(crate) fn new(
		store: Arc<dyn ConfigStore>,
		namespace: String,
		key: Option<String>,
		format: AnyFormat,
	) -> Self {
		Self {
			store,
			namespace,
			key,
			format,
			holder: Holder::new(),
			listeners: Listeners::new(),
			reload_lock: Mutex::new(()),
		}
	}

	/// Extracts, serializes and publishes a new value. Listeners are not run.
	pub(crate) fn load(&self) -> Result<Arc<String>, SubscribeError> {
		let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
		let extracted = extract(&*self.store, &self.namespace, self.key.as_deref())?;
		let text = self.format.encode(&extracted)?;
		let value = self.holder.replace(text, &self.namespace);
		debug!(
			namespace = %self.namespace,
			key = ?self.key,
			format = %self.format,
			version = self.holder.meta().map(|m| m.version),
			"Loaded config"
		);
		Ok(value)
	}

	/// One full pass: load, then run every listener in order.
	pub(crate) fn reload(&self) -> Result<(), SubscribeError> {
		self.load()?;
		self.listeners.dispatch();
		Ok(())
	}

	/// Change-notification entry point. Failures keep the last good value.
	pub(crate) fn handle_change(&self) {
		if let Err(e) = self.reload() {
			warn!(
				namespace = %self.namespace,
				key = ?self.key,
				error = %e,
				"Reload failed, keeping last loaded value"
			);
			#[cfg(feature = "events")]
			self.holder.report_failure(&self.namespace, e.to_string());
		}
	}
}
