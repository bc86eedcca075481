//! Single-writer append queue
//!
//! `ResponseStore::append` is a read-modify-write over one storage slot, so two
//! writers racing on the same slot can lose updates. `AppendQueue` removes the
//! race inside one process: a single worker owns the `ResponseStore` and applies
//! append requests one at a time, in arrival order.
//!
//! # Architecture
//!
//! ```text
//! AppendQueue (clonable handle) ──mpsc──► worker (spawn_blocking)
//!        ▲                                  │ owns ResponseStore<S>
//!        └──────────── oneshot reply ◄──────┘
//! ```
//!
//! The worker runs on tokio's blocking pool because store writes are
//! synchronous I/O. It exits once every handle has been dropped and hands the
//! store back through its `JoinHandle`.

use crate::core::response_store::ResponseStore;
use crate::core::traits::KeyValueStore;
use crate::types::{Record, SurveyError};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Queue depth used when callers pass zero
const MIN_CAPACITY: usize = 1;

struct AppendRequest {
    record: Record,
    reply: oneshot::Sender<Result<(), SurveyError>>,
}

/// Handle for submitting appends to the single writer
///
/// Cloning the handle is cheap; all clones feed the same worker.
#[derive(Debug, Clone)]
pub struct AppendQueue {
    sender: mpsc::Sender<AppendRequest>,
}

impl std::fmt::Debug for AppendRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppendRequest")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl AppendQueue {
    /// Start the worker and return a handle to it
    ///
    /// `capacity` bounds the number of pending requests; senders wait when the
    /// queue is full. Must be called from within a tokio runtime.
    ///
    /// The returned `JoinHandle` resolves to the store once all handles are
    /// dropped and every pending request has been applied.
    pub fn spawn<S>(
        store: ResponseStore<S>,
        capacity: usize,
    ) -> (Self, JoinHandle<ResponseStore<S>>)
    where
        S: KeyValueStore + Send + 'static,
    {
        let (sender, mut receiver) = mpsc::channel::<AppendRequest>(capacity.max(MIN_CAPACITY));

        let worker = tokio::task::spawn_blocking(move || {
            debug!(key = store.key(), "append queue started");
            while let Some(request) = receiver.blocking_recv() {
                let result = store.append(request.record);
                if let Err(e) = &result {
                    warn!(key = store.key(), error = %e, "queued append failed");
                }
                // The submitter may have given up waiting; the append stands either way
                let _ = request.reply.send(result);
            }
            debug!(key = store.key(), "append queue drained");
            store
        });

        (AppendQueue { sender }, worker)
    }

    /// Append a record through the single writer
    ///
    /// Resolves once the record has been written (or the write has failed).
    ///
    /// # Errors
    ///
    /// * The storage error of the failed append
    /// * `QueueClosed` if the worker is no longer running
    pub async fn append(&self, record: Record) -> Result<(), SurveyError> {
        let (reply, response) = oneshot::channel();

        self.sender
            .send(AppendRequest { record, reply })
            .await
            .map_err(|_| SurveyError::QueueClosed)?;

        response.await.map_err(|_| SurveyError::QueueClosed)?
    }
}
