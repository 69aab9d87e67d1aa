//! Article model
//!
//! `slug` and `sanitized_html` are derived fields. They are only written by
//! [`crate::normalize`], which runs on every save, so they have no public
//! setters. `created_at` is fixed when the record is constructed.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::author::AuthorRef;
use crate::cover::CoverSlots;

/// Article primary key
///
/// # Example
///
/// ```rust
/// use scriptorium_articles::ArticleId;
///
/// let id = ArticleId::new();
/// let parsed: ArticleId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleId(pub Uuid);

impl ArticleId {
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for ArticleId {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for ArticleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for ArticleId {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(Uuid::parse_str(s)?))
	}
}

/// Cover image stored inline in the record
///
/// Bytes and MIME type live in one value so they can only be set or cleared together.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverBlob {
	#[serde(with = "serde_bytes")]
	pub data: Vec<u8>,
	pub content_type: String,
}

impl CoverBlob {
	pub fn new(data: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
		Self {
			data: data.into(),
			content_type: content_type.into(),
		}
	}
}

impl fmt::Debug for CoverBlob {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CoverBlob")
			.field("len", &self.data.len())
			.field("content_type", &self.content_type)
			.finish()
	}
}

/// Persisted article document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
	id: ArticleId,
	pub title: String,
	pub description: Option<String>,
	pub markdown: String,
	slug: Option<String>,
	sanitized_html: Option<String>,
	created_at: DateTime<Utc>,
	cover_image_name: Option<String>,
	cover_image_blob: Option<CoverBlob>,
	pub author: Option<AuthorRef>,
}

impl ArticleRecord {
	/// Empty article, as shown by a "new article" form
	pub fn new() -> Self {
		Self {
			id: ArticleId::new(),
			title: String::new(),
			description: None,
			markdown: String::new(),
			slug: None,
			sanitized_html: None,
			created_at: Utc::now(),
			cover_image_name: None,
			cover_image_blob: None,
			author: None,
		}
	}

	pub fn id(&self) -> ArticleId {
		self.id
	}

	pub fn slug(&self) -> Option<&str> {
		self.slug.as_deref()
	}

	pub fn sanitized_html(&self) -> Option<&str> {
		self.sanitized_html.as_deref()
	}

	pub fn created_at(&self) -> DateTime<Utc> {
		self.created_at
	}

	/// File name of the filesystem-backed cover
	pub fn cover_image_name(&self) -> Option<&str> {
		self.cover_image_name.as_deref()
	}

	/// Bytes of the inline cover
	pub fn cover_image_blob(&self) -> Option<&[u8]> {
		self.cover_image_blob.as_ref().map(|b| b.data.as_slice())
	}

	/// MIME type of the inline cover
	pub fn cover_image_blob_type(&self) -> Option<&str> {
		self.cover_image_blob.as_ref().map(|b| b.content_type.as_str())
	}

	/// Storage path of the filesystem cover below `cover_dir`
	pub fn cover_image_path(&self, cover_dir: &str) -> Option<String> {
		self.cover_image_name
			.as_deref()
			.map(|name| crate::cover::cover_path(cover_dir, name))
	}

	/// `data:` URI for rendering the inline cover directly in an `<img>` tag
	pub fn cover_image_data_uri(&self) -> Option<String> {
		self.cover_image_blob
			.as_ref()
			.map(|b| format!("data:{};base64,{}", b.content_type, STANDARD.encode(&b.data)))
	}

	/// Current state of both cover slots
	pub fn cover_slots(&self) -> CoverSlots {
		CoverSlots {
			name: self.cover_image_name.clone(),
			blob: self.cover_image_blob.clone(),
		}
	}

	pub(crate) fn set_cover_slots(&mut self, slots: CoverSlots) {
		self.cover_image_name = slots.name;
		self.cover_image_blob = slots.blob;
	}

	pub(crate) fn set_derived(&mut self, slug: Option<String>, sanitized_html: Option<String>) {
		if slug.is_some() {
			self.slug = slug;
		}
		if sanitized_html.is_some() {
			self.sanitized_html = sanitized_html;
		}
	}
}

impl Default for ArticleRecord {
	fn default() -> Self {
		Self::new()
	}
}
