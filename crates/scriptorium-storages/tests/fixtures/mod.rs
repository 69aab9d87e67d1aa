//! Local storage backend test fixtures.

#![allow(dead_code)]

use rstest::fixture;
use scriptorium_storages::backends::LocalStorage;
use scriptorium_storages::config::LocalConfig;
use scriptorium_storages::StorageBackend;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Temporary directory paired with a local backend rooted in it.
///
/// The directory is removed when this value is dropped, so keep it alive for
/// the whole test.
pub struct LocalTestDir {
	temp_dir: TempDir,
	backend: Arc<dyn StorageBackend>,
}

impl LocalTestDir {
	pub fn new() -> Self {
		let temp_dir = TempDir::new().expect("Failed to create temp dir");
		let base_path = temp_dir.path().to_string_lossy().into_owned();
		let backend = LocalStorage::new(LocalConfig { base_path }).expect("Failed to create local backend");

		Self {
			temp_dir,
			backend: Arc::new(backend),
		}
	}

	pub fn backend(&self) -> Arc<dyn StorageBackend> {
		Arc::clone(&self.backend)
	}

	pub fn path(&self) -> &Path {
		self.temp_dir.path()
	}
}

/// Local test directory fixture.
#[fixture]
pub fn local_dir() -> LocalTestDir {
	LocalTestDir::new()
}

/// Generate unique file name with prefix.
pub fn generate_unique_name(prefix: &str) -> String {
	format!("{}-{}", prefix, uuid::Uuid::new_v4())
}
