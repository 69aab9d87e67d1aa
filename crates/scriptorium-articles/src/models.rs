//! Model definitions for articles
//!
//! - `ArticleRecord`: the persisted article document
//! - `Author`: optional author entity referenced by articles
//! - `CoverBlob`: inline cover image bytes paired with their MIME type

pub mod article;
pub mod author;

pub use article::{ArticleId, ArticleRecord, CoverBlob};
pub use author::{Author, AuthorId, AuthorRef};
