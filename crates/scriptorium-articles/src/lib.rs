//! # scriptorium-articles
//!
//! Article management core for Scriptorium: normalization of user input into
//! persistable records and the lifecycle of article cover images.
//!
//! ## Features
//!
//! - `ArticleRecord` model with derived `slug` and `sanitized_html` fields
//! - Normalization on every save: slug from the title, markdown rendered and
//!   sanitized to HTML, required-field checks
//! - Two independent cover slots: a file in the cover directory and an inline blob
//! - Upload validation restricted to JPEG, PNG and GIF
//! - Background cleanup of replaced, removed and orphaned cover files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scriptorium_articles::prelude::*;
//! use scriptorium_storages::{StorageConfig, create_storage};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let storage = create_storage(StorageConfig::from_env()?).await?;
//! let (service, _worker) = ArticleService::new(
//!     Arc::new(MemoryStore::new()),
//!     storage,
//!     ArticlesConfig::from_env()?,
//! );
//!
//! let article = service
//!     .create_article(ArticleFields::new("Hello World!", "# hi"), CoverUploads::default())
//!     .await?;
//! assert_eq!(article.slug(), Some("hello-world"));
//! # Ok(())
//! # }
//! ```

pub mod cleanup;
pub mod config;
pub mod cover;
pub mod error;
pub mod models;
pub mod normalize;
pub mod repository;
pub mod service;
pub mod store;
pub mod upload;

pub use config::ArticlesConfig;
pub use error::{ArticleError, Result};
pub use models::{ArticleId, ArticleRecord, Author, AuthorId, AuthorRef, CoverBlob};
pub use normalize::{NormalizedArticle, normalize};
pub use service::{ArticleFields, ArticleService, CoverRemoval, CoverUploads, SubmissionError};
pub use store::{DocumentStore, MemoryStore, SortOrder, StoreError};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::config::ArticlesConfig;
	pub use crate::cover::{CoverContext, CoverSlots};
	pub use crate::error::{ArticleError, Result};
	pub use crate::models::{ArticleId, ArticleRecord, Author, AuthorRef, CoverBlob};
	pub use crate::service::{
		ArticleFields, ArticleService, CoverRemoval, CoverUploads, SubmissionError,
	};
	pub use crate::store::{DocumentStore, MemoryStore, SortOrder};
	pub use crate::upload::{UploadPolicy, UploadedFile};
}
