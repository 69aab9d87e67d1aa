//! # scriptorium-storages
//!
//! File storage backend abstraction for Scriptorium.
//!
//! Uploaded cover images are written through a [`StorageBackend`] and released
//! through the same backend when an article drops or replaces its cover.
//!
//! ## Example
//!
//! ```rust,no_run
//! use scriptorium_storages::{StorageBackend, create_storage, StorageConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StorageConfig::from_env()?;
//!     let storage = create_storage(config).await?;
//!
//!     storage.save("uploads/article-covers/cover.png", b"...").await?;
//!     storage.delete("uploads/article-covers/cover.png").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod backends;
pub mod config;
pub mod error;
pub mod factory;

pub use backend::StorageBackend;
pub use config::StorageConfig;
pub use error::{Result, StorageError};
pub use factory::create_storage;
