//! Background transfer worker.
//!
//! One long-lived task receives snapshots over a bounded channel and runs
//! each computation to completion on the blocking pool before taking the
//! next, so at most one computation is in flight. Every dispatch gets a
//! sequence number; a caller editing a map only wants the reply to its most
//! recent dispatch and uses [`PendingReply::recv`] to drop older ones.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::message::{TransferReply, TransferRequest};

/// Default number of requests that may wait behind the running one.
const DEFAULT_QUEUE_DEPTH: usize = 32;

/// Configuration for the transfer worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Maximum number of queued requests before `dispatch` waits. Zero is
    /// treated as one.
    pub queue_depth: usize,
}

impl WorkerConfig {
    /// Set a custom queue depth.
    pub fn with_queue_depth(mut self, queue_depth: usize) -> Self {
        self.queue_depth = queue_depth;
        self
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

/// Errors from dispatching to or awaiting the worker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkerError {
    /// The worker task is no longer running
    #[error("transfer worker has shut down")]
    Closed,

    /// A newer request was dispatched before this reply arrived
    #[error("reply to request {seq} superseded by request {latest}")]
    Superseded { seq: u64, latest: u64 },

    /// The computation task panicked
    #[error("transfer computation panicked")]
    Panicked,
}

type ReplySender = oneshot::Sender<Result<TransferReply, WorkerError>>;

/// A queued request.
struct Job {
    seq: u64,
    request: TransferRequest,
    reply: ReplySender,
}

/// Handle to the background transfer worker.
///
/// Cloning the handle shares the worker and its sequence counter. The
/// worker stops once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct TransferWorker {
    jobs: mpsc::Sender<Job>,
    latest: Arc<AtomicU64>,
}

impl TransferWorker {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(config: &WorkerConfig) -> Self {
        let (jobs, queue) = mpsc::channel(config.queue_depth.max(1));
        tokio::spawn(run(queue));

        Self {
            jobs,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Queue a snapshot for computation.
    ///
    /// The snapshot is moved into the worker, so later edits by the caller
    /// cannot affect the result. Waits only if the queue is full.
    pub async fn dispatch(&self, request: TransferRequest) -> Result<PendingReply, WorkerError> {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let (reply, pending) = oneshot::channel();

        self.jobs
            .send(Job {
                seq,
                request,
                reply,
            })
            .await
            .map_err(|_| WorkerError::Closed)?;

        Ok(PendingReply {
            seq,
            latest: self.latest.clone(),
            reply: pending,
        })
    }

    /// Dispatch a snapshot and wait for its reply, whether or not newer
    /// requests were dispatched meanwhile.
    pub async fn compute(&self, request: TransferRequest) -> Result<TransferReply, WorkerError> {
        self.dispatch(request).await?.recv_any().await
    }

    /// Sequence number of the most recent dispatch (0 before the first).
    pub fn latest_seq(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// A reply that has not arrived yet.
#[derive(Debug)]
pub struct PendingReply {
    seq: u64,
    latest: Arc<AtomicU64>,
    reply: oneshot::Receiver<Result<TransferReply, WorkerError>>,
}

impl PendingReply {
    /// Sequence number assigned at dispatch.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Wait for the reply, discarding it if a newer request was dispatched
    /// on the same worker in the meantime.
    pub async fn recv(self) -> Result<TransferReply, WorkerError> {
        let seq = self.seq;
        let latest = self.latest.clone();
        let reply = self.recv_any().await?;

        let latest = latest.load(Ordering::SeqCst);
        if latest != seq {
            debug!(seq, latest, "dropping stale transfer reply");
            return Err(WorkerError::Superseded { seq, latest });
        }

        Ok(reply)
    }

    /// Wait for the reply without checking for newer requests.
    pub async fn recv_any(self) -> Result<TransferReply, WorkerError> {
        self.reply.await.map_err(|_| WorkerError::Closed)?
    }
}

/// Worker loop: one job at a time until every handle is dropped.
async fn run(mut queue: mpsc::Receiver<Job>) {
    info!("transfer worker started");

    while let Some(Job {
        seq,
        request,
        reply,
    }) = queue.recv().await
    {
        let line_count = request.lines.len();
        let station_count = request.stations.len();

        let result = match tokio::task::spawn_blocking(move || request.compute()).await {
            Ok(reply) => {
                debug!(seq, line_count, station_count, "computed transfers");
                Ok(reply)
            }
            Err(e) => {
                warn!(seq, error = %e, "transfer computation failed");
                Err(WorkerError::Panicked)
            }
        };

        if reply.send(result).is_err() {
            debug!(seq, "caller dropped pending transfer reply");
        }
    }

    info!("transfer worker stopped");
}
