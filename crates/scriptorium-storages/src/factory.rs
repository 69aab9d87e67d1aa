//! Factory function for creating storage backends.

use crate::{Result, StorageBackend, StorageConfig};
use std::sync::Arc;

/// Create a storage backend from configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use scriptorium_storages::{create_storage, StorageConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = StorageConfig::from_env()?;
///     let storage = create_storage(config).await?;
///     Ok(())
/// }
/// ```
pub async fn create_storage(config: StorageConfig) -> Result<Arc<dyn StorageBackend>> {
	match config {
		#[cfg(feature = "local")]
		StorageConfig::Local(local_config) => {
			let storage = crate::backends::local::LocalStorage::new(local_config)?;
			Ok(Arc::new(storage))
		}
	}
}
