/* src/holder/event.rs */

use std::sync::Arc;

use super::Meta;

/// Events emitted by the holder when its value changes or a reload fails.
#[derive(Debug)]
pub enum HoldEvent<T> {
	/// The first value was stored.
	Loaded { value: Arc<T>, meta: Meta },
	/// An existing value was replaced.
	Updated {
		old: Arc<T>,
		new: Arc<T>,
		meta: Meta,
	},
	/// A reload failed; the current value was kept.
	Failed { namespace: String, reason: String },
}

// Values are shared through `Arc`, so cloning an event never needs `T: Clone`.
impl<T> Clone for HoldEvent<T> {
	fn clone(&self) -> Self {
		match self {
			Self::Loaded { value, meta } => Self::Loaded {
				value: Arc::clone(value),
				meta: meta.clone(),
			},
			Self::Updated { old, new, meta } => Self::Updated {
				old: Arc::clone(old),
				new: Arc::clone(new),
				meta: meta.clone(),
			},
			Self::Failed { namespace, reason } => Self::Failed {
				namespace: namespace.clone(),
				reason: reason.clone(),
			},
		}
	}
}
