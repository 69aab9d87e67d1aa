//! Storage backend trait definition.

use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage backend trait for file operations.
///
/// Names are relative to the backend root and use `/` as separator.
///
/// # Examples
///
/// ```rust,no_run
/// use scriptorium_storages::{StorageBackend, Result};
///
/// async fn example(storage: &dyn StorageBackend) -> Result<()> {
///     storage.save("covers/a.png", b"\x89PNG").await?;
///
///     if storage.exists("covers/a.png").await? {
///         let size = storage.size("covers/a.png").await?;
///         println!("File size: {} bytes", size);
///     }
///
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
	/// Save a file, creating parent directories as needed.
	///
	/// Returns the name the file was stored under.
	///
	/// # Errors
	///
	/// Returns `StorageError::InvalidPath` if `name` escapes the storage root.
	/// Returns `StorageError::PermissionDenied` if write access is denied.
	async fn save(&self, name: &str, content: &[u8]) -> Result<String>;

	/// Read a file.
	///
	/// # Errors
	///
	/// Returns `StorageError::NotFound` if the file doesn't exist.
	async fn open(&self, name: &str) -> Result<Vec<u8>>;

	/// Delete a file.
	///
	/// # Errors
	///
	/// Returns `StorageError::NotFound` if the file doesn't exist.
	/// Returns `StorageError::PermissionDenied` if delete access is denied.
	async fn delete(&self, name: &str) -> Result<()>;

	/// Check if a file exists.
	async fn exists(&self, name: &str) -> Result<bool>;

	/// Get the file size in bytes.
	///
	/// # Errors
	///
	/// Returns `StorageError::NotFound` if the file doesn't exist.
	async fn size(&self, name: &str) -> Result<u64>;

	/// Get the file's last modified timestamp.
	///
	/// # Errors
	///
	/// Returns `StorageError::NotFound` if the file doesn't exist.
	async fn get_modified_time(&self, name: &str) -> Result<DateTime<Utc>>;
}
