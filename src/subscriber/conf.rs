/* src/subscriber/conf.rs */

use std::path::PathBuf;

use serde::Deserialize;
use validator::Validate;

use super::SubscribeError;
use crate::format::AnyFormat;
use crate::store::ClientOptions;

pub const DEFAULT_CLUSTER: &str = "default";
pub const DEFAULT_NAMESPACE: &str = "application";
/// One pending reload covers any number of notifications behind it.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1;

/// How change notifications reach the reload path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Delivery {
	/// Reload and run listeners on the thread that delivered the notification.
	Inline,
	/// Queue the notification into a bounded channel drained by a dispatch
	/// task. Notifications arriving while the queue is full are coalesced
	/// into the pending reload.
	Queued {
		#[serde(default = "default_capacity")]
		capacity: usize,
	},
}

fn default_capacity() -> usize {
	DEFAULT_QUEUE_CAPACITY
}

impl Default for Delivery {
	fn default() -> Self {
		if cfg!(feature = "dispatch") {
			Self::Queued {
				capacity: DEFAULT_QUEUE_CAPACITY,
			}
		} else {
			Self::Inline
		}
	}
}

/// Construction settings for a [`Subscriber`](super::Subscriber).
///
/// Derives `Deserialize` with defaults so it can be embedded in a host
/// application's own config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct SubscriberConf {
	#[validate(length(min = 1, message = "app_id is required"))]
	pub app_id: String,
	pub cluster: String,
	/// Namespace name. A suffix such as `.json` selects the format when
	/// `format` is not set.
	pub namespace: String,
	#[validate(length(min = 1, message = "meta_addr is required"))]
	pub meta_addr: String,
	/// Overrides `meta_addr` as the server address when set.
	pub ip: Option<String>,
	/// Watch a single key instead of the whole namespace.
	pub key: Option<String>,
	/// `json`, `yaml` or `properties`.
	pub format: Option<String>,
	pub secret: Option<String>,
	pub backup: bool,
	pub backup_path: Option<PathBuf>,
	pub must_start: bool,
	pub delivery: Delivery,
}

impl Default for SubscriberConf {
	fn default() -> Self {
		Self {
			app_id: String::new(),
			cluster: DEFAULT_CLUSTER.to_string(),
			namespace: DEFAULT_NAMESPACE.to_string(),
			meta_addr: String::new(),
			ip: None,
			key: None,
			format: None,
			secret: None,
			backup: false,
			backup_path: None,
			must_start: false,
			delivery: Delivery::default(),
		}
	}
}

impl SubscriberConf {
	/// Checks required fields and delivery settings.
	pub fn check(&self) -> Result<(), SubscribeError> {
		self.validate()
			.map_err(|e| SubscribeError::ConfigInvalid(e.to_string()))?;
		if let Delivery::Queued { capacity: 0 } = self.delivery {
			return Err(SubscribeError::ConfigInvalid(
				"queued delivery needs a capacity of at least 1".to_string(),
			));
		}
		Ok(())
	}

	/// Namespace to read, falling back to `application` when blank.
	pub fn namespace(&self) -> &str {
		non_blank(&self.namespace).unwrap_or(DEFAULT_NAMESPACE)
	}

	/// Cluster label, falling back to `default` when blank.
	pub fn cluster(&self) -> &str {
		non_blank(&self.cluster).unwrap_or(DEFAULT_CLUSTER)
	}

	/// Selected key. A blank key means namespace mode.
	pub fn key(&self) -> Option<&str> {
		self.key.as_deref().and_then(non_blank)
	}

	/// Server address: `ip` when set, `meta_addr` otherwise.
	pub fn server_addr(&self) -> &str {
		self.ip.as_deref().and_then(non_blank).unwrap_or(self.meta_addr.as_str())
	}

	/// Output format: the explicit tag wins, then the namespace suffix, then
	/// JSON.
	pub fn resolve_format(&self) -> Result<AnyFormat, SubscribeError> {
		match self.format.as_deref().and_then(non_blank) {
			Some(tag) => tag
				.parse::<AnyFormat>()
				.map_err(|e| SubscribeError::ConfigInvalid(e.to_string())),
			None => Ok(AnyFormat::from_namespace(self.namespace()).unwrap_or_default()),
		}
	}

	/// Settings forwarded to the store collaborator.
	pub fn client_options(&self) -> ClientOptions {
		ClientOptions {
			app_id: self.app_id.clone(),
			cluster: self.cluster().to_string(),
			namespace: self.namespace().to_string(),
			server_addr: self.server_addr().to_string(),
			secret: self.secret.clone(),
			backup: self.backup,
			backup_path: self.backup_path.clone(),
			must_start: self.must_start,
		}
	}
}

fn non_blank(s: &str) -> Option<&str> {
	let trimmed = s.trim();
	(!trimmed.is_empty()).then_some(trimmed)
}
