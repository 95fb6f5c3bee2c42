//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedTransfers};
use crate::store::DocumentStore;
use crate::transfers::TransferWorker;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Document store for system and user lookups
    pub store: Arc<dyn DocumentStore>,

    /// Background transfer worker
    pub worker: TransferWorker,

    /// Cached transfers for stored systems
    pub transfers: Arc<CachedTransfers>,
}

impl AppState {
    /// Create a new app state.
    ///
    /// The transfer cache shares the store and worker.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        worker: TransferWorker,
        cache_config: &CacheConfig,
    ) -> Self {
        let transfers = CachedTransfers::new(store.clone(), worker.clone(), cache_config);

        Self {
            store,
            worker,
            transfers: Arc::new(transfers),
        }
    }
}
