//! Cover image upload receiver
//!
//! Accepts `image/jpeg`, `image/png` and `image/gif`. What happens to anything
//! else depends on [`UploadPolicy`]: the upload is dropped with a warning, or
//! the request fails with `ArticleError::UploadRejected`.

use bytes::Bytes;
use scriptorium_storages::StorageBackend;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::ArticlesConfig;
use crate::cover::cover_path;
use crate::error::{ArticleError, Result};
use crate::models::CoverBlob;

/// Image types accepted as covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
	Jpeg,
	Png,
	Gif,
}

impl ImageType {
	/// Parse a MIME type, ignoring parameters and case
	pub fn from_mime(content_type: &str) -> Option<Self> {
		let essence = content_type.split(';').next().unwrap_or_default().trim();
		match essence.to_ascii_lowercase().as_str() {
			"image/jpeg" => Some(ImageType::Jpeg),
			"image/png" => Some(ImageType::Png),
			"image/gif" => Some(ImageType::Gif),
			_ => None,
		}
	}

	pub fn mime(&self) -> &'static str {
		match self {
			ImageType::Jpeg => "image/jpeg",
			ImageType::Png => "image/png",
			ImageType::Gif => "image/gif",
		}
	}

	pub fn extension(&self) -> &'static str {
		match self {
			ImageType::Jpeg => "jpg",
			ImageType::Png => "png",
			ImageType::Gif => "gif",
		}
	}

	/// Whether the leading bytes carry this type's signature
	pub fn matches_magic(&self, bytes: &[u8]) -> bool {
		match self {
			ImageType::Jpeg => bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
			ImageType::Png => bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
			ImageType::Gif => bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a"),
		}
	}
}

/// What to do with an upload that fails validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadPolicy {
	/// Drop the upload and log a warning
	#[default]
	Ignore,
	/// Fail the request with `UploadRejected`
	Reject,
}

impl fmt::Display for UploadPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UploadPolicy::Ignore => write!(f, "ignore"),
			UploadPolicy::Reject => write!(f, "reject"),
		}
	}
}

impl FromStr for UploadPolicy {
	type Err = ArticleError;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_lowercase().as_str() {
			"ignore" => Ok(UploadPolicy::Ignore),
			"reject" => Ok(UploadPolicy::Reject),
			_ => Err(ArticleError::Config(format!("Invalid upload policy: {}", s))),
		}
	}
}

/// A file received from a multipart form field
#[derive(Debug, Clone)]
pub struct UploadedFile {
	pub field_name: String,
	pub file_name: Option<String>,
	pub content_type: String,
	pub data: Bytes,
}

impl UploadedFile {
	pub fn new(
		field_name: impl Into<String>,
		content_type: impl Into<String>,
		data: impl Into<Bytes>,
	) -> Self {
		Self {
			field_name: field_name.into(),
			file_name: None,
			content_type: content_type.into(),
			data: data.into(),
		}
	}

	pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
		self.file_name = Some(file_name.into());
		self
	}
}

/// An upload written to the cover directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
	/// File name inside the cover directory
	pub name: String,
}

impl StoredUpload {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

/// Validates cover uploads and writes filesystem covers to storage
pub struct UploadReceiver {
	storage: Arc<dyn StorageBackend>,
	config: ArticlesConfig,
}

impl UploadReceiver {
	pub fn new(storage: Arc<dyn StorageBackend>, config: ArticlesConfig) -> Self {
		Self { storage, config }
	}

	/// Validate an upload, returning its image type when it is acceptable
	///
	/// An empty payload (a form submitted without choosing a file) counts as
	/// no upload at all.
	pub fn check(&self, file: &UploadedFile) -> Result<Option<ImageType>> {
		if file.data.is_empty() {
			return Ok(None);
		}

		let rejection = match ImageType::from_mime(&file.content_type) {
			None => Err(format!("content type '{}' is not allowed", file.content_type)),
			Some(_) if file.data.len() > self.config.max_upload_bytes => Err(format!(
				"{} bytes exceeds the {} byte limit",
				file.data.len(),
				self.config.max_upload_bytes
			)),
			Some(image_type)
				if self.config.verify_magic_bytes && !image_type.matches_magic(&file.data) =>
			{
				Err(format!("content does not look like {}", image_type.mime()))
			}
			Some(image_type) => Ok(image_type),
		};

		match rejection {
			Ok(image_type) => Ok(Some(image_type)),
			Err(reason) => match self.config.upload_policy {
				UploadPolicy::Ignore => {
					tracing::warn!(
						field = %file.field_name,
						content_type = %file.content_type,
						reason = %reason,
						"Ignoring rejected cover upload"
					);
					Ok(None)
				}
				UploadPolicy::Reject => Err(ArticleError::UploadRejected {
					field: file.field_name.clone(),
					reason,
				}),
			},
		}
	}

	/// Validate and write a filesystem cover under a generated name
	pub async fn receive_filesystem(&self, file: &UploadedFile) -> Result<Option<StoredUpload>> {
		let Some(image_type) = self.check(file)? else {
			return Ok(None);
		};

		let name = format!("{}.{}", uuid::Uuid::new_v4(), image_type.extension());
		self.storage
			.save(&cover_path(&self.config.cover_dir, &name), &file.data)
			.await?;

		tracing::debug!(
			field = %file.field_name,
			original = file.file_name.as_deref().unwrap_or_default(),
			stored = %name,
			"Stored cover upload"
		);
		Ok(Some(StoredUpload { name }))
	}

	/// Validate an inline cover
	pub fn receive_blob(&self, file: &UploadedFile) -> Result<Option<CoverBlob>> {
		Ok(self
			.check(file)?
			.map(|image_type| CoverBlob::new(file.data.to_vec(), image_type.mime())))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("image/jpeg", Some(ImageType::Jpeg))]
	#[case("IMAGE/PNG", Some(ImageType::Png))]
	#[case("image/gif; charset=binary", Some(ImageType::Gif))]
	#[case("image/svg+xml", None)]
	#[case("image/webp", None)]
	#[case("text/html", None)]
	fn test_from_mime(#[case] mime: &str, #[case] expected: Option<ImageType>) {
		assert_eq!(ImageType::from_mime(mime), expected);
	}

	#[rstest]
	#[case(ImageType::Jpeg, &[0xFF, 0xD8, 0xFF, 0xE0], true)]
	#[case(ImageType::Png, &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00], true)]
	#[case(ImageType::Gif, b"GIF89a..", true)]
	#[case(ImageType::Gif, b"GIF87a..", true)]
	#[case(ImageType::Png, &[0xFF, 0xD8, 0xFF], false)]
	#[case(ImageType::Jpeg, b"<svg>", false)]
	fn test_matches_magic(#[case] image_type: ImageType, #[case] bytes: &[u8], #[case] expected: bool) {
		assert_eq!(image_type.matches_magic(bytes), expected);
	}

	#[rstest]
	#[case("ignore", UploadPolicy::Ignore)]
	#[case("REJECT", UploadPolicy::Reject)]
	fn test_upload_policy_from_str(#[case] input: &str, #[case] expected: UploadPolicy) {
		assert_eq!(input.parse::<UploadPolicy>().unwrap(), expected);
	}

	#[test]
	fn test_upload_policy_invalid() {
		assert!(matches!(
			"drop".parse::<UploadPolicy>(),
			Err(ArticleError::Config(_))
		));
	}
}
