use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use actix_web::rt::task::{JoinError, JoinHandle};

use crate::models::complaint::{Complaint, ComplaintRepository, NewComplaint};
use crate::uploads::{ImageBlobStore, StoredImage};

#[derive(Debug)]
pub enum TaskError {
    Aborted,
    Failed(JoinError),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::Aborted => write!(f, "task aborted"),
            TaskError::Failed(e) => write!(f, "task failed: {e}"),
        }
    }
}

/// Handle to a spawned task that is aborted when the handle is dropped.
///
/// Handlers keep the handle on their own stack, so a request that is
/// abandoned mid-flight takes its background work down with it.
pub struct ScopedTask<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T: 'static> ScopedTask<T> {
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = T> + 'static,
    {
        Self { handle: Some(actix_web::rt::spawn(fut)) }
    }

    /// Wait for the task. Dropping this future before it resolves aborts the task.
    pub async fn join(mut self) -> Result<T, TaskError> {
        let Some(handle) = self.handle.as_mut() else {
            return Err(TaskError::Aborted);
        };
        let result = handle.await;
        self.handle = None;
        result.map_err(|e| {
            if e.is_cancelled() {
                TaskError::Aborted
            } else {
                TaskError::Failed(e)
            }
        })
    }

    pub fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }
}

impl<T> Drop for ScopedTask<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Store `photos` and then `new` after the simulated submission latency.
/// Nothing is kept if the task is aborted first.
pub fn submit_complaint(
    store: Arc<dyn ComplaintRepository>,
    uploads: Arc<dyn ImageBlobStore>,
    new: NewComplaint,
    photos: Vec<StoredImage>,
    delay: Duration,
) -> ScopedTask<Complaint> {
    ScopedTask::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let refs: Vec<String> = photos.into_iter().map(|photo| uploads.put(photo)).collect();
        store.append(new.with_uploaded(refs))
    })
}
