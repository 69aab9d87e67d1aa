//! Tests for cover upload validation and storage

mod fixtures;

use fixtures::{GIF_BYTES, JPEG_BYTES, PNG_BYTES, TestStorage, jpeg_upload};
use rstest::rstest;
use scriptorium_articles::cover::cover_path;
use scriptorium_articles::upload::{UploadPolicy, UploadReceiver, UploadedFile};
use scriptorium_articles::{ArticleError, ArticlesConfig};

fn receiver(storage: &TestStorage, config: ArticlesConfig) -> UploadReceiver {
	UploadReceiver::new(std::sync::Arc::clone(&storage.backend), config)
}

// --- Happy Path ---

#[rstest]
#[case("image/jpeg", JPEG_BYTES, "jpg")]
#[case("image/png", PNG_BYTES, "png")]
#[case("image/gif", GIF_BYTES, "gif")]
#[tokio::test]
async fn test_receive_filesystem_writes_file(
	#[case] content_type: &str,
	#[case] bytes: &[u8],
	#[case] extension: &str,
) {
	// Arrange
	let storage = TestStorage::new();
	let config = ArticlesConfig::default();
	let receiver = receiver(&storage, config.clone());
	let file = UploadedFile::new("cover", content_type, bytes.to_vec());

	// Act
	let stored = receiver.receive_filesystem(&file).await.unwrap().unwrap();

	// Assert
	assert!(stored.name.ends_with(&format!(".{}", extension)));
	let content = storage
		.backend
		.open(&cover_path(&config.cover_dir, &stored.name))
		.await
		.unwrap();
	assert_eq!(content, bytes);
}

#[rstest]
#[tokio::test]
async fn test_receive_filesystem_ignores_client_file_name() {
	// Arrange
	let storage = TestStorage::new();
	let receiver = receiver(&storage, ArticlesConfig::default());
	let file = jpeg_upload("cover").with_file_name("../../etc/passwd.jpg");

	// Act
	let stored = receiver.receive_filesystem(&file).await.unwrap().unwrap();

	// Assert
	assert!(!stored.name.contains('/'));
	assert!(!stored.name.contains("passwd"));
}

#[rstest]
fn test_receive_blob_keeps_bytes_and_type() {
	// Arrange
	let storage = TestStorage::new();
	let receiver = receiver(&storage, ArticlesConfig::default());
	let file = UploadedFile::new("cover_blob", "image/PNG", PNG_BYTES.to_vec());

	// Act
	let blob = receiver.receive_blob(&file).unwrap().unwrap();

	// Assert
	assert_eq!(blob.data, PNG_BYTES);
	assert_eq!(blob.content_type, "image/png");
}

#[rstest]
#[tokio::test]
async fn test_empty_upload_counts_as_absent() {
	// Arrange
	let storage = TestStorage::new();
	let receiver = receiver(
		&storage,
		ArticlesConfig::default().with_upload_policy(UploadPolicy::Reject),
	);
	let file = UploadedFile::new("cover", "application/octet-stream", Vec::new());

	// Act
	let stored = receiver.receive_filesystem(&file).await.unwrap();

	// Assert
	assert!(stored.is_none());
}

// --- Ignore policy ---

#[rstest]
#[case("image/svg+xml", b"<svg onload=alert(1)>".to_vec())]
#[case("text/html", b"<html>".to_vec())]
#[case("image/webp", b"RIFF0000WEBP".to_vec())]
#[tokio::test]
async fn test_ignore_policy_drops_disallowed_types(#[case] content_type: &str, #[case] bytes: Vec<u8>) {
	// Arrange
	let storage = TestStorage::new();
	let config = ArticlesConfig::default();
	let receiver = receiver(&storage, config.clone());
	let file = UploadedFile::new("cover", content_type, bytes);

	// Act
	let stored = receiver.receive_filesystem(&file).await.unwrap();

	// Assert
	assert!(stored.is_none());
	assert!(!storage.temp_dir.path().join(&config.cover_dir).exists());
}

// --- Reject policy ---

#[rstest]
#[tokio::test]
async fn test_reject_policy_errors_on_disallowed_type() {
	// Arrange
	let storage = TestStorage::new();
	let receiver = receiver(
		&storage,
		ArticlesConfig::default().with_upload_policy(UploadPolicy::Reject),
	);
	let file = UploadedFile::new("cover", "application/pdf", b"%PDF-1.7".to_vec());

	// Act
	let result = receiver.receive_filesystem(&file).await;

	// Assert
	match result {
		Err(ArticleError::UploadRejected { field, reason }) => {
			assert_eq!(field, "cover");
			assert!(reason.contains("application/pdf"));
		}
		other => panic!("expected UploadRejected, got {:?}", other),
	}
}

#[rstest]
fn test_reject_policy_errors_on_mismatched_magic_bytes() {
	// Arrange
	let storage = TestStorage::new();
	let receiver = receiver(
		&storage,
		ArticlesConfig::default().with_upload_policy(UploadPolicy::Reject),
	);
	let file = UploadedFile::new("cover_blob", "image/png", JPEG_BYTES.to_vec());

	// Act
	let result = receiver.receive_blob(&file);

	// Assert
	assert!(matches!(result, Err(ArticleError::UploadRejected { .. })));
}

#[rstest]
fn test_magic_byte_check_can_be_disabled() {
	// Arrange
	let storage = TestStorage::new();
	let receiver = receiver(
		&storage,
		ArticlesConfig::default()
			.with_upload_policy(UploadPolicy::Reject)
			.with_verify_magic_bytes(false),
	);
	let file = UploadedFile::new("cover_blob", "image/png", b"not really a png".to_vec());

	// Act
	let blob = receiver.receive_blob(&file).unwrap();

	// Assert
	assert!(blob.is_some());
}

#[rstest]
fn test_reject_policy_errors_on_oversized_upload() {
	// Arrange
	let storage = TestStorage::new();
	let receiver = receiver(
		&storage,
		ArticlesConfig::default()
			.with_upload_policy(UploadPolicy::Reject)
			.with_max_upload_bytes(4),
	);
	let file = UploadedFile::new("cover_blob", "image/jpeg", JPEG_BYTES.to_vec());

	// Act
	let result = receiver.receive_blob(&file);

	// Assert
	assert!(matches!(result, Err(ArticleError::UploadRejected { .. })));
}
