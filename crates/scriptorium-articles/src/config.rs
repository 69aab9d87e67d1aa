//! Article service configuration

use std::env;

use crate::error::{ArticleError, Result};
use crate::upload::UploadPolicy;

/// Default directory for filesystem covers, relative to the storage root
pub const DEFAULT_COVER_DIR: &str = "uploads/article-covers";

/// Default upload size limit (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Configuration for article cover handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlesConfig {
	/// Directory below the storage root holding filesystem covers
	pub cover_dir: String,
	/// Handling of uploads that fail validation
	pub upload_policy: UploadPolicy,
	/// Check that upload content matches the declared image type
	pub verify_magic_bytes: bool,
	/// Largest accepted upload in bytes
	pub max_upload_bytes: usize,
}

impl Default for ArticlesConfig {
	fn default() -> Self {
		Self {
			cover_dir: DEFAULT_COVER_DIR.to_string(),
			upload_policy: UploadPolicy::default(),
			verify_magic_bytes: true,
			max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
		}
	}
}

impl ArticlesConfig {
	pub fn with_cover_dir(mut self, cover_dir: impl Into<String>) -> Self {
		self.cover_dir = cover_dir.into();
		self
	}

	pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
		self.upload_policy = policy;
		self
	}

	pub fn with_verify_magic_bytes(mut self, enabled: bool) -> Self {
		self.verify_magic_bytes = enabled;
		self
	}

	pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
		self.max_upload_bytes = limit;
		self
	}

	/// Load configuration from environment variables, falling back to defaults.
	///
	/// # Environment Variables
	///
	/// - `SCRIPTORIUM_COVER_DIR`: cover directory (default `uploads/article-covers`)
	/// - `SCRIPTORIUM_UPLOAD_POLICY`: `ignore` or `reject` (default `ignore`)
	/// - `SCRIPTORIUM_VERIFY_MAGIC_BYTES`: boolean (default `true`)
	/// - `SCRIPTORIUM_MAX_UPLOAD_BYTES`: size limit in bytes (default 5 MiB)
	pub fn from_env() -> Result<Self> {
		let mut config = Self::default();

		if let Ok(cover_dir) = env::var("SCRIPTORIUM_COVER_DIR") {
			config.cover_dir = cover_dir;
		}
		if let Ok(policy) = env::var("SCRIPTORIUM_UPLOAD_POLICY") {
			config.upload_policy = policy.parse()?;
		}
		if let Ok(verify) = env::var("SCRIPTORIUM_VERIFY_MAGIC_BYTES") {
			config.verify_magic_bytes = parse_bool(&verify).ok_or_else(|| {
				ArticleError::Config(format!(
					"SCRIPTORIUM_VERIFY_MAGIC_BYTES is not a boolean: {}",
					verify
				))
			})?;
		}
		if let Ok(limit) = env::var("SCRIPTORIUM_MAX_UPLOAD_BYTES") {
			config.max_upload_bytes = limit.trim().parse().map_err(|_| {
				ArticleError::Config(format!(
					"SCRIPTORIUM_MAX_UPLOAD_BYTES is not a byte count: {}",
					limit
				))
			})?;
		}

		Ok(config)
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}
