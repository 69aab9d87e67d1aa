use crate::models::ArticleId;
use scriptorium_storages::StorageError;
use thiserror::Error;

/// Errors that can occur while managing articles
#[derive(Debug, Error)]
pub enum ArticleError {
	/// A required field is empty or could not be derived
	#[error("Required field missing: {field}")]
	RequiredFieldMissing { field: &'static str },

	/// Another article already uses this value for a unique field
	#[error("Duplicate {field}: '{value}' is already in use")]
	UniquenessViolation { field: &'static str, value: String },

	/// Upload has a disallowed type, bad content or is too large
	#[error("Upload rejected for field '{field}': {reason}")]
	UploadRejected { field: String, reason: String },

	/// Deleting a stored file failed
	///
	/// Only ever logged; public operations never return it.
	#[error("Failed to clean up '{name}': {reason}")]
	FilesystemCleanupFailure { name: String, reason: String },

	/// Article does not exist
	#[error("Article not found: {0}")]
	NotFound(ArticleId),

	/// Markdown could not be rendered
	#[error("Markdown rendering failed: {0}")]
	Render(String),

	/// Storage backend error while writing an upload
	#[error("Storage error: {0}")]
	Storage(#[from] StorageError),

	/// Document store error not covered by a validation kind
	#[error("Store error: {0}")]
	Store(String),

	/// Configuration error
	#[error("Configuration error: {0}")]
	Config(String),
}

impl ArticleError {
	/// Whether this is a validation failure the user can correct by editing the form.
	pub fn is_validation(&self) -> bool {
		matches!(
			self,
			ArticleError::RequiredFieldMissing { .. }
				| ArticleError::UniquenessViolation { .. }
				| ArticleError::UploadRejected { .. }
		)
	}
}

/// Result type for article operations
pub type Result<T> = std::result::Result<T, ArticleError>;
