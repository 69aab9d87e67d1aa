//! # Scriptorium
//!
//! Article publishing with markdown rendering and managed cover images.
//!
//! This crate re-exports the workspace members:
//!
//! - [`articles`]: article records, normalization, cover uploads and the
//!   [`ArticleService`](articles::ArticleService) entry points
//! - [`storages`]: the [`StorageBackend`](storages::StorageBackend) abstraction
//!   and its local filesystem implementation
//!
//! ## Configuration
//!
//! Both layers read their settings from the environment:
//!
//! ```bash
//! STORAGE_BACKEND=local
//! LOCAL_BASE_PATH=/var/lib/scriptorium
//! SCRIPTORIUM_COVER_DIR=uploads/article-covers
//! SCRIPTORIUM_UPLOAD_POLICY=ignore
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use scriptorium::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let storage = create_storage(StorageConfig::from_env()?).await?;
//! let (service, worker) = ArticleService::new(
//!     Arc::new(MemoryStore::new()),
//!     storage,
//!     ArticlesConfig::from_env()?,
//! );
//!
//! for article in service.list_articles().await? {
//!     println!("{}", article.title);
//! }
//!
//! drop(service);
//! worker.join().await;
//! # Ok(())
//! # }
//! ```

pub use scriptorium_articles as articles;
pub use scriptorium_storages as storages;

/// Commonly used types from every layer
pub mod prelude {
	pub use scriptorium_articles::prelude::*;
	pub use scriptorium_storages::{StorageBackend, StorageConfig, StorageError, create_storage};
}
