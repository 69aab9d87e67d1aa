//! Configuration types for storage backends.

use crate::{Result, StorageError};
use std::env;
use std::str::FromStr;

/// Storage backend type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendType {
	/// Local file system
	Local,
}

impl std::fmt::Display for BackendType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			BackendType::Local => write!(f, "Local"),
		}
	}
}

impl FromStr for BackendType {
	type Err = StorageError;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_lowercase().as_str() {
			"local" => Ok(BackendType::Local),
			_ => Err(StorageError::ConfigError(format!(
				"Invalid backend type: {}",
				s
			))),
		}
	}
}

/// Configuration for local file system backend.
#[cfg(feature = "local")]
#[derive(Debug, Clone)]
pub struct LocalConfig {
	/// Base directory path for file storage
	pub base_path: String,
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub enum StorageConfig {
	#[cfg(feature = "local")]
	Local(LocalConfig),
}

impl StorageConfig {
	/// Load configuration from environment variables.
	///
	/// # Environment Variables
	///
	/// - `STORAGE_BACKEND`: Backend type (only "local" is supported)
	///
	/// ## Local Backend
	/// - `LOCAL_BASE_PATH`: Base directory path (required)
	pub fn from_env() -> Result<Self> {
		let backend_type = env::var("STORAGE_BACKEND").map_err(|_| {
			StorageError::ConfigError("STORAGE_BACKEND environment variable not set".to_string())
		})?;

		let backend_type = backend_type.parse::<BackendType>()?;

		match backend_type {
			#[cfg(feature = "local")]
			BackendType::Local => {
				let base_path = env::var("LOCAL_BASE_PATH").map_err(|_| {
					StorageError::ConfigError(
						"LOCAL_BASE_PATH environment variable not set".to_string(),
					)
				})?;

				Ok(StorageConfig::Local(LocalConfig { base_path }))
			}
			#[allow(unreachable_patterns)]
			_ => Err(StorageError::ConfigError(format!(
				"Backend type not enabled: {:?}",
				backend_type
			))),
		}
	}
}
