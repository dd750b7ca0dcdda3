/* src/subscriber/dispatch.rs */

use std::sync::Arc;

use super::Delivery;
use super::inner::Core;
use crate::store::ChangeCallback;

/// Background dispatch task; aborted when dropped.
#[cfg_attr(not(feature = "dispatch"), allow(dead_code))]
pub(crate) struct DispatchTask {
	#[cfg(feature = "dispatch")]
	abort_handle: tokio::task::AbortHandle,
}

impl Drop for DispatchTask {
	fn drop(&mut self) {
		#[cfg(feature = "dispatch")]
		self.abort_handle.abort();
	}
}

/// Builds the callback handed to the store and, for queued delivery, the
/// task draining the queue. Returns the delivery actually in effect.
///
/// The callback only holds a weak reference, so the store keeping it alive
/// does not keep the subscriber alive.
pub(crate) fn attach(
	core: &Arc<Core>,
	requested: Delivery,
) -> (ChangeCallback, Option<DispatchTask>, Delivery) {
	match requested {
		Delivery::Inline => (inline(core), None, Delivery::Inline),
		Delivery::Queued { capacity } => queued(core, capacity),
	}
}

fn inline(core: &Arc<Core>) -> ChangeCallback {
	let weak = Arc::downgrade(core);
	Arc::new(move || {
		if let Some(core) = weak.upgrade() {
			core.handle_change();
		}
	})
}

#[cfg(feature = "dispatch")]
fn queued(core: &Arc<Core>, capacity: usize) -> (ChangeCallback, Option<DispatchTask>, Delivery) {
	use tokio::sync::mpsc::{self, error::TrySendError};

	let Ok(runtime) = tokio::runtime::Handle::try_current() else {
		tracing::warn!(
			namespace = %core.namespace,
			"No tokio runtime for queued delivery, falling back to inline"
		);
		return (inline(core), None, Delivery::Inline);
	};

	let (tx, rx) = mpsc::channel::<()>(capacity);
	let handle = runtime.spawn(drain(rx, Arc::downgrade(core)));

	let namespace = core.namespace.clone();
	let callback: ChangeCallback = Arc::new(move || match tx.try_send(()) {
		Ok(()) => {}
		// A queued reload re-reads the whole namespace, so this one is covered.
		Err(TrySendError::Full(())) => {
			tracing::trace!(namespace = %namespace, "Change coalesced into pending reload");
		}
		Err(TrySendError::Closed(())) => {
			tracing::warn!(namespace = %namespace, "Dispatch task stopped, change dropped");
		}
	});

	let task = DispatchTask {
		abort_handle: handle.abort_handle(),
	};
	(callback, Some(task), Delivery::Queued { capacity })
}

#[cfg(not(feature = "dispatch"))]
fn queued(core: &Arc<Core>, _capacity: usize) -> (ChangeCallback, Option<DispatchTask>, Delivery) {
	tracing::warn!(
		namespace = %core.namespace,
		"Queued delivery needs the `dispatch` feature, falling back to inline"
	);
	(inline(core), None, Delivery::Inline)
}

/// Runs one reload per queued notification, off the async workers so slow
/// listeners never stall the runtime.
#[cfg(feature = "dispatch")]
async fn drain(mut rx: tokio::sync::mpsc::Receiver<()>, core: std::sync::Weak<Core>) {
	while rx.recv().await.is_some() {
		let Some(core) = core.upgrade() else {
			break;
		};
		if let Err(e) = tokio::task::spawn_blocking(move || core.handle_change()).await {
			tracing::error!(error = %e, "Reload task failed");
		}
	}
	tracing::debug!("Dispatch task stopped");
}
