//! Import failures.

use thiserror::Error;

/// Why a topology document was rejected. The store is never modified when
/// one of these is returned.
#[derive(Debug, Error)]
pub enum ImportError {
	/// The text is not valid JSON.
	#[error("invalid topology file: {0}")]
	Parse(#[source] serde_json::Error),

	/// Valid JSON, but not a topology document.
	#[error("unexpected topology shape: {0}")]
	Shape(String),
}

impl ImportError {
	/// Short message for the alert shown to the user.
	pub fn public_message(&self) -> &'static str {
		match self {
			ImportError::Parse(_) => "The selected file is not valid JSON.",
			ImportError::Shape(_) => "The selected file is not a topology export (expected \"nodes\" and \"edges\" arrays).",
		}
	}
}
