/* src/format/error.rs */

/// Errors raised while turning a snapshot into text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
	/// The encoder for the selected format rejected the snapshot.
	#[error("{format} encode error: {reason}")]
	Encode { format: &'static str, reason: String },

	/// The format tag is unknown or its cargo feature is disabled.
	#[error("unsupported format: {0}")]
	Unsupported(String),
}
