//! Article service
//!
//! Entry points for an HTTP layer: form submissions for create and update,
//! deletion, and the read operations backing the index, show and edit pages.

use scriptorium_storages::StorageBackend;
use std::sync::Arc;
use thiserror::Error;

use crate::cleanup::{CleanupQueue, CleanupWorker, delete_best_effort};
use crate::config::ArticlesConfig;
use crate::cover::{self, CoverContext, CoverRequest, CoverTransition, cover_path};
use crate::error::{ArticleError, Result};
use crate::models::{ArticleId, ArticleRecord, AuthorRef};
use crate::repository::ArticleRepository;
use crate::store::{DocumentStore, SortOrder};
use crate::upload::{StoredUpload, UploadReceiver, UploadedFile};

/// User-editable article fields from a form submission
#[derive(Debug, Clone, Default)]
pub struct ArticleFields {
	pub title: String,
	pub description: Option<String>,
	pub markdown: String,
	pub author: Option<AuthorRef>,
}

impl ArticleFields {
	pub fn new(title: impl Into<String>, markdown: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			markdown: markdown.into(),
			..Default::default()
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn with_author(mut self, author: AuthorRef) -> Self {
		self.author = Some(author);
		self
	}

	fn apply_to(self, article: &mut ArticleRecord) {
		article.title = self.title;
		article.description = self.description.filter(|d| !d.is_empty());
		article.markdown = self.markdown;
		article.author = self.author;
	}
}

/// Cover files submitted with a form
#[derive(Debug, Clone, Default)]
pub struct CoverUploads {
	/// Written to the cover directory
	pub filesystem: Option<UploadedFile>,
	/// Stored inline in the record
	pub blob: Option<UploadedFile>,
}

/// Cover removal checkboxes of the edit form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverRemoval {
	pub filesystem: bool,
	pub blob: bool,
}

/// A failed create or update
///
/// Carries the submitted values so the form can be shown again for correction.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SubmissionError {
	pub article: ArticleRecord,
	#[source]
	pub error: ArticleError,
}

impl SubmissionError {
	fn new(article: ArticleRecord, error: ArticleError) -> Self {
		Self { article, error }
	}
}

/// Article management facade
pub struct ArticleService {
	repository: ArticleRepository,
	storage: Arc<dyn StorageBackend>,
	uploads: UploadReceiver,
	cleanup: CleanupQueue,
	config: ArticlesConfig,
}

impl ArticleService {
	/// Create a service and spawn its cleanup worker on the current runtime
	///
	/// # Panics
	///
	/// Panics if called outside a tokio runtime, since the cleanup worker is
	/// spawned immediately.
	pub fn new(
		store: Arc<dyn DocumentStore>,
		storage: Arc<dyn StorageBackend>,
		config: ArticlesConfig,
	) -> (Self, CleanupWorker) {
		let (cleanup, worker) = CleanupQueue::spawn(Arc::clone(&storage));
		let service = Self {
			repository: ArticleRepository::new(store),
			uploads: UploadReceiver::new(Arc::clone(&storage), config.clone()),
			storage,
			cleanup,
			config,
		};
		(service, worker)
	}

	pub fn config(&self) -> &ArticlesConfig {
		&self.config
	}

	/// Storage path of a filesystem cover
	pub fn cover_path(&self, name: &str) -> String {
		cover_path(&self.config.cover_dir, name)
	}

	/// Empty article for a "new article" form
	pub fn new_article(&self) -> ArticleRecord {
		ArticleRecord::new()
	}

	/// All articles, newest first
	pub async fn list_articles(&self) -> Result<Vec<ArticleRecord>> {
		self.repository.find_all(SortOrder::CreatedAtDesc).await
	}

	/// Article for the show page
	pub async fn show_article(&self, slug: &str) -> Result<Option<ArticleRecord>> {
		self.repository.find_by_slug(slug).await
	}

	/// Article for the edit form
	pub async fn edit_article(&self, id: ArticleId) -> Result<Option<ArticleRecord>> {
		self.repository.find_by_id(id).await
	}

	/// Create an article from a form submission
	pub async fn create_article(
		&self,
		fields: ArticleFields,
		uploads: CoverUploads,
	) -> std::result::Result<ArticleRecord, SubmissionError> {
		let mut article = ArticleRecord::new();
		fields.apply_to(&mut article);

		let saved = self
			.save_with_covers(article, CoverContext::Create, uploads, CoverRemoval::default())
			.await?;
		tracing::info!(id = %saved.id(), slug = saved.slug().unwrap_or_default(), "Created article");
		Ok(saved)
	}

	/// Update an article from an edit form submission
	pub async fn update_article(
		&self,
		id: ArticleId,
		fields: ArticleFields,
		uploads: CoverUploads,
		removal: CoverRemoval,
	) -> std::result::Result<ArticleRecord, SubmissionError> {
		let existing = match self.repository.find_by_id(id).await {
			Ok(Some(existing)) => existing,
			Ok(None) => {
				let mut submitted = ArticleRecord::new();
				fields.apply_to(&mut submitted);
				return Err(SubmissionError::new(submitted, ArticleError::NotFound(id)));
			}
			Err(e) => {
				let mut submitted = ArticleRecord::new();
				fields.apply_to(&mut submitted);
				return Err(SubmissionError::new(submitted, e));
			}
		};

		let mut article = existing;
		fields.apply_to(&mut article);

		let saved = self
			.save_with_covers(article, CoverContext::Update, uploads, removal)
			.await?;
		tracing::info!(id = %saved.id(), slug = saved.slug().unwrap_or_default(), "Updated article");
		Ok(saved)
	}

	/// Delete an article and release its filesystem cover
	///
	/// Deleting an unknown id is a no-op.
	pub async fn delete_article(&self, id: ArticleId) -> Result<()> {
		match self.repository.delete_by_id(id).await? {
			Some(deleted) => {
				if let Some(name) = deleted.cover_image_name() {
					self.cleanup.schedule(self.cover_path(name));
				}
				tracing::info!(id = %id, "Deleted article");
			}
			None => tracing::debug!(id = %id, "Delete requested for unknown article"),
		}
		Ok(())
	}

	/// Wait for every scheduled cleanup to finish
	pub async fn flush_cleanup(&self) {
		self.cleanup.flush().await;
	}

	async fn save_with_covers(
		&self,
		mut article: ArticleRecord,
		context: CoverContext,
		uploads: CoverUploads,
		removal: CoverRemoval,
	) -> std::result::Result<ArticleRecord, SubmissionError> {
		let filesystem_upload = match &uploads.filesystem {
			Some(file) => match self.uploads.receive_filesystem(file).await {
				Ok(stored) => stored,
				Err(e) => return Err(SubmissionError::new(article, e)),
			},
			None => None,
		};

		let blob_upload = match &uploads.blob {
			Some(file) => match self.uploads.receive_blob(file) {
				Ok(blob) => blob,
				Err(e) => {
					self.discard(filesystem_upload.as_ref()).await;
					return Err(SubmissionError::new(article, e));
				}
			},
			None => None,
		};

		let CoverTransition {
			slots,
			delete_on_success,
			delete_on_failure,
		} = cover::plan(
			article.cover_slots(),
			context,
			CoverRequest {
				filesystem_upload,
				blob_upload,
				remove_filesystem: removal.filesystem,
				remove_blob: removal.blob,
			},
		);

		let previous_slots = article.cover_slots();
		article.set_cover_slots(slots);

		match self.repository.save(article.clone()).await {
			Ok(saved) => {
				for name in delete_on_success {
					self.cleanup.schedule(self.cover_path(&name));
				}
				Ok(saved)
			}
			Err(e) => {
				tracing::debug!(error = %e, "Article save failed");
				for name in &delete_on_failure {
					delete_best_effort(self.storage.as_ref(), &self.cover_path(name)).await;
				}
				article.set_cover_slots(previous_slots);
				Err(SubmissionError::new(article, e))
			}
		}
	}

	async fn discard(&self, upload: Option<&StoredUpload>) {
		if let Some(upload) = upload {
			delete_best_effort(self.storage.as_ref(), &self.cover_path(&upload.name)).await;
		}
	}
}
