//! Article repository
//!
//! Wraps a [`DocumentStore`] so that `save` always normalizes first.

use std::sync::Arc;

use crate::error::{ArticleError, Result};
use crate::models::{ArticleId, ArticleRecord};
use crate::normalize::normalize;
use crate::store::{DocumentStore, SortOrder, StoreError};

impl From<StoreError> for ArticleError {
	fn from(err: StoreError) -> Self {
		match err {
			StoreError::UniqueViolation { field, value } => {
				ArticleError::UniquenessViolation { field, value }
			}
			StoreError::Backend(msg) => ArticleError::Store(msg),
		}
	}
}

/// Article persistence with mandatory normalization
#[derive(Clone)]
pub struct ArticleRepository {
	store: Arc<dyn DocumentStore>,
}

impl ArticleRepository {
	pub fn new(store: Arc<dyn DocumentStore>) -> Self {
		Self { store }
	}

	/// Normalize and persist an article
	///
	/// # Errors
	///
	/// Returns `RequiredFieldMissing` when normalization fails and
	/// `UniquenessViolation` when another article already has the slug.
	pub async fn save(&self, article: ArticleRecord) -> Result<ArticleRecord> {
		let normalized = normalize(article)?;
		Ok(self.store.upsert(normalized).await?)
	}

	pub async fn find_by_id(&self, id: ArticleId) -> Result<Option<ArticleRecord>> {
		Ok(self.store.find_by_id(id).await?)
	}

	pub async fn find_by_slug(&self, slug: &str) -> Result<Option<ArticleRecord>> {
		Ok(self.store.find_by_slug(slug).await?)
	}

	pub async fn find_all(&self, order: SortOrder) -> Result<Vec<ArticleRecord>> {
		Ok(self.store.find_all(order).await?)
	}

	pub async fn delete_by_id(&self, id: ArticleId) -> Result<Option<ArticleRecord>> {
		Ok(self.store.delete_by_id(id).await?)
	}
}
