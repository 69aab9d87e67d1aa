//! Test fixtures for scriptorium-articles
//!
//! Provides image payloads with valid signatures and a service harness backed
//! by a temporary storage root and an in-memory document store.

#![allow(dead_code)]

use scriptorium_articles::cleanup::CleanupStats;
use scriptorium_articles::cover::cover_path;
use scriptorium_articles::prelude::*;
use scriptorium_storages::StorageBackend;
use scriptorium_storages::backends::LocalStorage;
use scriptorium_storages::config::LocalConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];
pub const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00";

pub fn jpeg_upload(field: &str) -> UploadedFile {
	UploadedFile::new(field, "image/jpeg", JPEG_BYTES.to_vec()).with_file_name("photo.jpg")
}

pub fn png_upload(field: &str) -> UploadedFile {
	UploadedFile::new(field, "image/png", PNG_BYTES.to_vec()).with_file_name("x.png")
}

pub fn gif_upload(field: &str) -> UploadedFile {
	UploadedFile::new(field, "image/gif", GIF_BYTES.to_vec()).with_file_name("anim.gif")
}

pub fn filesystem_cover(file: UploadedFile) -> CoverUploads {
	CoverUploads {
		filesystem: Some(file),
		blob: None,
	}
}

pub fn blob_cover(file: UploadedFile) -> CoverUploads {
	CoverUploads {
		filesystem: None,
		blob: Some(file),
	}
}

/// Temporary local storage backend
pub struct TestStorage {
	pub temp_dir: TempDir,
	pub backend: Arc<dyn StorageBackend>,
}

impl TestStorage {
	pub fn new() -> Self {
		let temp_dir = TempDir::new().expect("Failed to create temp dir");
		let backend = LocalStorage::new(LocalConfig {
			base_path: temp_dir.path().to_string_lossy().into_owned(),
		})
		.expect("Failed to create local backend");

		Self {
			temp_dir,
			backend: Arc::new(backend),
		}
	}
}

/// Article service wired to temporary storage
///
/// Must be constructed inside a tokio runtime because the cleanup worker is
/// spawned immediately.
pub struct ServiceHarness {
	pub storage: TestStorage,
	pub store: Arc<MemoryStore>,
	pub service: ArticleService,
	worker: scriptorium_articles::cleanup::CleanupWorker,
}

impl ServiceHarness {
	pub fn new() -> Self {
		Self::with_config(ArticlesConfig::default())
	}

	pub fn with_config(config: ArticlesConfig) -> Self {
		let storage = TestStorage::new();
		let store = Arc::new(MemoryStore::new());
		let (service, worker) = ArticleService::new(
			Arc::clone(&store) as Arc<dyn DocumentStore>,
			Arc::clone(&storage.backend),
			config,
		);

		Self {
			storage,
			store,
			service,
			worker,
		}
	}

	/// Whether the cover file `name` exists in storage
	pub async fn cover_exists(&self, name: &str) -> bool {
		self.storage
			.backend
			.exists(&cover_path(&self.service.config().cover_dir, name))
			.await
			.expect("Failed to check cover existence")
	}

	/// Number of files currently in the cover directory
	pub fn cover_file_count(&self) -> usize {
		let dir: PathBuf = self
			.storage
			.temp_dir
			.path()
			.join(&self.service.config().cover_dir);
		match std::fs::read_dir(dir) {
			Ok(entries) => entries.filter_map(|e| e.ok()).count(),
			Err(_) => 0,
		}
	}

	/// Wait for scheduled cleanups
	pub async fn settle(&self) {
		self.service.flush_cleanup().await;
	}

	/// Drop the service and collect the cleanup worker's counters
	pub async fn shutdown(self) -> (CleanupStats, TestStorage) {
		let Self {
			storage,
			service,
			worker,
			..
		} = self;
		drop(service);
		(worker.join().await, storage)
	}
}
