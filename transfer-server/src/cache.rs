//! Caching layer for computed transfers.
//!
//! Computing transfers for a stored system means fetching the document and
//! running the computation on the worker. Results are cached per system and
//! keyed on the document's last-update time, so an edited system misses the
//! cache and is recomputed while the stale entry ages out. Documents without
//! a last-update time are never cached, since an edit would not change
//! their key.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{SystemDoc, SystemId};
use crate::store::{DocumentStore, StoreError};
use crate::transfers::{TransferRequest, TransferWorker, TransfersByStation, WorkerError};

/// Cache key: (system id, last update in millis since the epoch).
type TransfersKey = (SystemId, i64);

/// Cached transfers entry.
type TransfersEntry = Arc<TransfersByStation>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Errors from looking up transfers for a stored system.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Worker(#[from] WorkerError),
}

/// Cache of computed transfers.
pub struct TransferCache {
    entries: MokaCache<TransfersKey, TransfersEntry>,
}

impl TransferCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Key for this revision of a system, if it has a last-update time.
    fn key(doc: &SystemDoc) -> Option<TransfersKey> {
        let millis = doc.last_updated_millis()?;
        Some((doc.system_id.clone(), millis))
    }

    /// Get cached transfers for this revision of a system, running `init`
    /// on a miss.
    ///
    /// Concurrent misses for the same revision share one `init`. Failed
    /// computations are not cached.
    pub async fn get_with<F>(
        &self,
        doc: &SystemDoc,
        init: F,
    ) -> Result<TransfersEntry, WorkerError>
    where
        F: Future<Output = Result<TransfersEntry, WorkerError>>,
    {
        let Some(key) = Self::key(doc) else {
            debug!(system_id = %doc.system_id, "system has no lastUpdated, not caching");
            return init.await;
        };

        self.entries
            .try_get_with(key, init)
            .await
            .map_err(|e| (*e).clone())
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

/// Transfers for stored systems, with caching.
///
/// Wraps a document store and the transfer worker.
pub struct CachedTransfers {
    store: Arc<dyn DocumentStore>,
    worker: TransferWorker,
    cache: TransferCache,
}

impl CachedTransfers {
    /// Create a new cached lookup.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        worker: TransferWorker,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            store,
            worker,
            cache: TransferCache::new(cache_config),
        }
    }

    /// Transfers for a stored system, or `None` if the system does not
    /// exist.
    pub async fn system_transfers(
        &self,
        system_id: &SystemId,
    ) -> Result<Option<TransfersEntry>, LookupError> {
        let Some(doc) = self.store.get_system_doc_data(system_id).await? else {
            return Ok(None);
        };

        Ok(Some(self.transfers_for(doc).await?))
    }

    /// Transfers for an already fetched system document.
    pub async fn transfers_for(&self, doc: SystemDoc) -> Result<TransfersEntry, WorkerError> {
        let compute = async {
            debug!(system_id = %doc.system_id, "transfer cache miss");
            let reply = self
                .worker
                .compute(TransferRequest::from(doc.map.clone()))
                .await?;
            Ok::<_, WorkerError>(Arc::new(reply.transfers_by_station_id))
        };

        self.cache.get_with(&doc, compute).await
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
