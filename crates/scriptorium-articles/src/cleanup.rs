//! Best-effort file cleanup
//!
//! Deletions run on a background task fed by an unbounded channel, so callers
//! never wait on them and a failed deletion never reaches the request that
//! scheduled it. Failures are logged as `FilesystemCleanupFailure`.

use scriptorium_storages::{StorageBackend, StorageError};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::ArticleError;

enum CleanupJob {
	Delete(String),
	Flush(oneshot::Sender<()>),
}

/// Counters reported by a finished [`CleanupWorker`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupStats {
	pub deleted: usize,
	pub failed: usize,
}

/// Handle for scheduling file deletions
///
/// Cloning is cheap; the worker stops once every handle is dropped.
#[derive(Clone)]
pub struct CleanupQueue {
	tx: mpsc::UnboundedSender<CleanupJob>,
}

/// Background task executing scheduled deletions
pub struct CleanupWorker {
	handle: JoinHandle<CleanupStats>,
}

impl CleanupQueue {
	/// Spawn the worker on the current tokio runtime
	///
	/// # Panics
	///
	/// Panics if called outside a tokio runtime.
	pub fn spawn(storage: Arc<dyn StorageBackend>) -> (Self, CleanupWorker) {
		let (tx, mut rx) = mpsc::unbounded_channel();

		let handle = tokio::spawn(async move {
			let mut stats = CleanupStats::default();
			while let Some(job) = rx.recv().await {
				match job {
					CleanupJob::Delete(path) => {
						if delete_best_effort(storage.as_ref(), &path).await {
							stats.deleted += 1;
						} else {
							stats.failed += 1;
						}
					}
					CleanupJob::Flush(done) => {
						let _ = done.send(());
					}
				}
			}
			stats
		});

		(Self { tx }, CleanupWorker { handle })
	}

	/// Schedule a deletion without waiting for it
	pub fn schedule(&self, path: impl Into<String>) {
		let path = path.into();
		tracing::debug!(path = %path, "Scheduling file cleanup");
		if self.tx.send(CleanupJob::Delete(path)).is_err() {
			tracing::warn!("Cleanup worker has stopped; deletion dropped");
		}
	}

	/// Wait until every deletion scheduled before this call has run
	pub async fn flush(&self) {
		let (done_tx, done_rx) = oneshot::channel();
		if self.tx.send(CleanupJob::Flush(done_tx)).is_ok() {
			let _ = done_rx.await;
		}
	}
}

impl CleanupWorker {
	/// Wait for the worker to drain its queue and stop
	///
	/// Resolves once every [`CleanupQueue`] handle has been dropped.
	pub async fn join(self) -> CleanupStats {
		match self.handle.await {
			Ok(stats) => stats,
			Err(e) => {
				tracing::error!(error = %e, "Cleanup worker panicked");
				CleanupStats::default()
			}
		}
	}
}

/// Delete `path`, logging instead of returning any failure
///
/// Returns whether the file was removed.
pub async fn delete_best_effort(storage: &dyn StorageBackend, path: &str) -> bool {
	match storage.delete(path).await {
		Ok(()) => {
			tracing::debug!(path = %path, "Cleaned up file");
			true
		}
		Err(e) => {
			let failure = ArticleError::FilesystemCleanupFailure {
				name: path.to_string(),
				reason: e.to_string(),
			};
			match e {
				StorageError::NotFound(_) => tracing::debug!(error = %failure, "File already gone"),
				_ => tracing::warn!(error = %failure, "File cleanup failed"),
			}
			false
		}
	}
}
