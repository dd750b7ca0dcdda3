/* src/holder/error.rs */

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HoldError {
	/// No value has been stored yet.
	#[error("no snapshot loaded yet")]
	NoSnapshotYet,
}
