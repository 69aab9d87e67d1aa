//! Local file system storage backend implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::config::LocalConfig;
use crate::{Result, StorageBackend, StorageError};

/// Local file system storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
	base_path: PathBuf,
}

impl LocalStorage {
	/// Create a new local storage backend.
	///
	/// # Errors
	///
	/// Returns `StorageError::ConfigError` if the base path is missing or not a directory.
	pub fn new(config: LocalConfig) -> Result<Self> {
		let base_path = PathBuf::from(config.base_path);

		if !base_path.exists() {
			return Err(StorageError::ConfigError(format!(
				"Base path does not exist: {}",
				base_path.display()
			)));
		}

		if !base_path.is_dir() {
			return Err(StorageError::ConfigError(format!(
				"Base path is not a directory: {}",
				base_path.display()
			)));
		}

		Ok(Self { base_path })
	}

	/// Root directory of this backend.
	pub fn base_path(&self) -> &Path {
		&self.base_path
	}

	/// Resolve `name` below the base path, refusing anything that could escape it.
	fn get_path(&self, name: &str) -> Result<PathBuf> {
		let relative = Path::new(name);
		if name.is_empty()
			|| relative
				.components()
				.any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
		{
			return Err(StorageError::InvalidPath(name.to_string()));
		}
		Ok(self.base_path.join(relative))
	}
}

fn map_io(name: &str, err: std::io::Error) -> StorageError {
	match err.kind() {
		ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
		ErrorKind::PermissionDenied => StorageError::PermissionDenied(name.to_string()),
		_ => StorageError::Io(err),
	}
}

#[async_trait]
impl StorageBackend for LocalStorage {
	async fn save(&self, name: &str, content: &[u8]) -> Result<String> {
		let path = self.get_path(name)?;

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)
				.await
				.map_err(|e| map_io(name, e))?;
		}

		fs::write(&path, content).await.map_err(|e| map_io(name, e))?;
		tracing::debug!(name = %name, bytes = content.len(), "Stored file");

		Ok(name.to_string())
	}

	async fn open(&self, name: &str) -> Result<Vec<u8>> {
		let path = self.get_path(name)?;
		fs::read(&path).await.map_err(|e| map_io(name, e))
	}

	async fn delete(&self, name: &str) -> Result<()> {
		let path = self.get_path(name)?;
		fs::remove_file(&path).await.map_err(|e| map_io(name, e))?;
		tracing::debug!(name = %name, "Deleted file");
		Ok(())
	}

	async fn exists(&self, name: &str) -> Result<bool> {
		let path = self.get_path(name)?;
		match fs::metadata(&path).await {
			Ok(metadata) => Ok(metadata.is_file()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
			Err(e) => Err(map_io(name, e)),
		}
	}

	async fn size(&self, name: &str) -> Result<u64> {
		let path = self.get_path(name)?;
		let metadata = fs::metadata(&path).await.map_err(|e| map_io(name, e))?;
		Ok(metadata.len())
	}

	async fn get_modified_time(&self, name: &str) -> Result<DateTime<Utc>> {
		let path = self.get_path(name)?;
		let metadata = fs::metadata(&path).await.map_err(|e| map_io(name, e))?;
		let modified = metadata.modified()?;

		let datetime: DateTime<Utc> = modified.into();
		Ok(datetime)
	}
}
