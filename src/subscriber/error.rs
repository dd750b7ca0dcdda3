/* src/subscriber/error.rs */

use thiserror::Error;

use crate::format::FormatError;
use crate::holder::HoldError;
use crate::store::StoreError;

/// Errors that can occur in the Subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
	#[error("Invalid config: {0}")]
	ConfigInvalid(String),

	#[error("Store error: {0}")]
	Store(#[from] StoreError),

	#[error("Format error: {0}")]
	Format(#[from] FormatError),

	#[error("Hold error: {0}")]
	Hold(#[from] HoldError),
}

impl SubscribeError {
	/// True when a selected key was absent from the namespace.
	pub fn is_key_not_found(&self) -> bool {
		matches!(self, Self::Store(StoreError::KeyNotFound { .. }))
	}

	/// True when the store could not serve the read.
	pub fn is_unavailable(&self) -> bool {
		matches!(self, Self::Store(StoreError::Unavailable { .. }))
	}
}
