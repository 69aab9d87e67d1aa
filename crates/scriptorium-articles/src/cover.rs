//! Cover image lifecycle
//!
//! An article has two independent cover slots: a file in the cover directory
//! referenced by name, and an inline blob. Either, both or neither may be set.
//! [`plan`] computes the new slot values for one request together with the
//! file deletions to run once the save succeeds or fails.
//!
//! Rules are applied in order:
//!
//! 1. A blob upload overwrites the blob slot.
//! 2. On create, a file upload fills the name slot.
//! 3. On update, a file upload replaces the name slot and schedules the
//!    previous file for deletion.
//! 4. On update, a file removal request clears the name slot and schedules the
//!    file for deletion, unless rule 3 already replaced it.
//! 5. On update, a blob removal request clears the blob slot. It runs after
//!    rule 1, so a request carrying both a blob upload and a blob removal ends
//!    with an empty blob slot.
//!
//! A freshly written upload is listed in [`CoverTransition::delete_on_failure`]
//! so a failed save never leaves an orphaned file behind. The one exception is
//! an upload stored under the name the record already references.

use serde::{Deserialize, Serialize};

use crate::models::CoverBlob;
use crate::upload::StoredUpload;

/// Whether the request creates a new article or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverContext {
	Create,
	Update,
}

/// Cover slot values of an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverSlots {
	/// Filesystem cover file name
	pub name: Option<String>,
	/// Inline cover
	pub blob: Option<CoverBlob>,
}

/// Cover changes carried by a single create or update request
#[derive(Debug, Clone, Default)]
pub struct CoverRequest {
	/// File already written to the cover directory by the upload step
	pub filesystem_upload: Option<StoredUpload>,
	pub blob_upload: Option<CoverBlob>,
	pub remove_filesystem: bool,
	pub remove_blob: bool,
}

/// Result of applying a [`CoverRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverTransition {
	/// Slot values to persist
	pub slots: CoverSlots,
	/// File names to delete after the save succeeded
	pub delete_on_success: Vec<String>,
	/// File names to delete if the save fails
	pub delete_on_failure: Vec<String>,
}

/// Compute the new cover slots and pending deletions for a request
///
/// # Examples
///
/// ```rust
/// use scriptorium_articles::cover::{plan, CoverContext, CoverRequest, CoverSlots};
/// use scriptorium_articles::upload::StoredUpload;
///
/// let current = CoverSlots { name: Some("old.jpg".into()), blob: None };
/// let request = CoverRequest {
///     filesystem_upload: Some(StoredUpload::new("new.jpg")),
///     ..Default::default()
/// };
///
/// let transition = plan(current, CoverContext::Update, request);
/// assert_eq!(transition.slots.name.as_deref(), Some("new.jpg"));
/// assert_eq!(transition.delete_on_success, vec!["old.jpg".to_string()]);
/// assert_eq!(transition.delete_on_failure, vec!["new.jpg".to_string()]);
/// ```
pub fn plan(current: CoverSlots, context: CoverContext, request: CoverRequest) -> CoverTransition {
	let CoverSlots { mut name, mut blob } = current;
	let mut delete_on_success = Vec::new();
	let mut delete_on_failure = Vec::new();

	if let Some(upload) = request.blob_upload {
		blob = Some(upload);
	}

	match (context, request.filesystem_upload) {
		(CoverContext::Create, Some(upload)) => {
			delete_on_failure.push(upload.name.clone());
			name = Some(upload.name);
		}
		(CoverContext::Update, Some(upload)) => {
			// Same name: the upload overwrote the file the record already references
			match name.take() {
				Some(previous) if previous == upload.name => {}
				Some(previous) => {
					delete_on_success.push(previous);
					delete_on_failure.push(upload.name.clone());
				}
				None => delete_on_failure.push(upload.name.clone()),
			}
			name = Some(upload.name);
		}
		(CoverContext::Update, None) if request.remove_filesystem => {
			if let Some(previous) = name.take() {
				delete_on_success.push(previous);
			}
		}
		_ => {}
	}

	if context == CoverContext::Update && request.remove_blob {
		blob = None;
	}

	CoverTransition {
		slots: CoverSlots { name, blob },
		delete_on_success,
		delete_on_failure,
	}
}

/// Storage path of a cover file name below `cover_dir`
pub fn cover_path(cover_dir: &str, name: &str) -> String {
	let dir = cover_dir.trim_end_matches('/');
	if dir.is_empty() {
		name.to_string()
	} else {
		format!("{}/{}", dir, name)
	}
}
