//! Transfer computation and its background worker.
//!
//! A transfer is a station served by more than one line. This module
//! computes, for every station in a snapshot, the set of lines stopping
//! there, and runs that computation off the request path.

mod compute;
mod message;
mod worker;

pub use compute::{TransfersByStation, compute_transfers, line_stops};
pub use message::{TransferReply, TransferRequest};
pub use worker::{PendingReply, TransferWorker, WorkerConfig, WorkerError};
