/* src/store/options.rs */

use std::path::PathBuf;

/// Client settings forwarded unmodified to the store collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
	pub app_id: String,
	pub cluster: String,
	pub namespace: String,
	/// Config server address. May be a bare host or a full URL.
	pub server_addr: String,
	pub secret: Option<String>,
	/// Whether the store should keep a local backup of fetched data.
	pub backup: bool,
	pub backup_path: Option<PathBuf>,
	/// Whether the store should refuse to start when the server is unreachable.
	pub must_start: bool,
}
