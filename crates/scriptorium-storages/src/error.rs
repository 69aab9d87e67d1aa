//! Storage error types.

use thiserror::Error;

/// Errors returned by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
	/// File does not exist
	#[error("File not found: {0}")]
	NotFound(String),

	/// Access to the file was denied
	#[error("Permission denied: {0}")]
	PermissionDenied(String),

	/// Name escapes the storage root or is otherwise unusable
	#[error("Invalid path: {0}")]
	InvalidPath(String),

	/// Backend configuration is missing or invalid
	#[error("Configuration error: {0}")]
	ConfigError(String),

	/// Underlying I/O failure
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
