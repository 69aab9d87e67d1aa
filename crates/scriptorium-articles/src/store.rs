//! Document store abstraction
//!
//! Stores only accept [`NormalizedArticle`]s, so every persisted record went
//! through [`crate::normalize::normalize`]. Implementations must enforce slug
//! uniqueness atomically with the write.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{ArticleId, ArticleRecord};
use crate::normalize::NormalizedArticle;

/// Errors raised by a document store
#[derive(Debug, Error)]
pub enum StoreError {
	/// Unique index violated
	#[error("Unique constraint violated on {field}: '{value}'")]
	UniqueViolation { field: &'static str, value: String },

	/// Backend failure
	#[error("Store backend error: {0}")]
	Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Ordering for [`DocumentStore::find_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
	/// Newest first
	#[default]
	CreatedAtDesc,
	CreatedAtAsc,
}

/// Persistence collaborator for article documents
#[async_trait]
pub trait DocumentStore: Send + Sync {
	async fn find_by_id(&self, id: ArticleId) -> StoreResult<Option<ArticleRecord>>;

	async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<ArticleRecord>>;

	async fn find_all(&self, order: SortOrder) -> StoreResult<Vec<ArticleRecord>>;

	/// Insert or replace the document with the article's id
	///
	/// # Errors
	///
	/// Returns `StoreError::UniqueViolation` if another document has the same slug.
	async fn upsert(&self, article: NormalizedArticle) -> StoreResult<ArticleRecord>;

	/// Remove a document, returning it if it existed
	async fn delete_by_id(&self, id: ArticleId) -> StoreResult<Option<ArticleRecord>>;
}

/// In-process document store
///
/// Holds all documents in a map behind a lock; the slug check and the write
/// happen under the same write guard, like a unique index would.
#[derive(Debug, Default)]
pub struct MemoryStore {
	documents: RwLock<HashMap<ArticleId, ArticleRecord>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.documents.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.documents.read().is_empty()
	}
}

#[async_trait]
impl DocumentStore for MemoryStore {
	async fn find_by_id(&self, id: ArticleId) -> StoreResult<Option<ArticleRecord>> {
		Ok(self.documents.read().get(&id).cloned())
	}

	async fn find_by_slug(&self, slug: &str) -> StoreResult<Option<ArticleRecord>> {
		Ok(self
			.documents
			.read()
			.values()
			.find(|doc| doc.slug() == Some(slug))
			.cloned())
	}

	async fn find_all(&self, order: SortOrder) -> StoreResult<Vec<ArticleRecord>> {
		let mut documents: Vec<ArticleRecord> = self.documents.read().values().cloned().collect();
		match order {
			SortOrder::CreatedAtDesc => documents.sort_by_key(|doc| std::cmp::Reverse(doc.created_at())),
			SortOrder::CreatedAtAsc => documents.sort_by_key(|doc| doc.created_at()),
		}
		Ok(documents)
	}

	async fn upsert(&self, article: NormalizedArticle) -> StoreResult<ArticleRecord> {
		let mut documents = self.documents.write();

		let slug = article.slug();
		if documents
			.values()
			.any(|doc| doc.id() != article.id() && doc.slug() == Some(slug))
		{
			return Err(StoreError::UniqueViolation {
				field: "slug",
				value: slug.to_string(),
			});
		}

		let record = article.into_inner();
		documents.insert(record.id(), record.clone());
		Ok(record)
	}

	async fn delete_by_id(&self, id: ArticleId) -> StoreResult<Option<ArticleRecord>> {
		Ok(self.documents.write().remove(&id))
	}
}
