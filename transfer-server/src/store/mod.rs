//! Document store access.
//!
//! Systems and users live in a hosted document store. This crate only
//! reads them by id; a missing document is `Ok(None)`, not an error.

mod client;
mod error;
mod file;

pub use client::{HttpDocumentStore, HttpStoreConfig};
pub use error::StoreError;
pub use file::FileDocumentStore;

use futures::future::BoxFuture;

use crate::domain::{SystemDoc, SystemId, UserDoc, UserId};

/// Read access to stored documents.
///
/// Boxed futures keep the trait object safe, so the web layer can hold an
/// `Arc<dyn DocumentStore>` regardless of the backing store.
pub trait DocumentStore: Send + Sync {
    /// Fetch a system document by id.
    fn get_system_doc_data<'a>(
        &'a self,
        system_id: &'a SystemId,
    ) -> BoxFuture<'a, Result<Option<SystemDoc>, StoreError>>;

    /// Fetch a user document by id.
    fn get_user_doc_data<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, Result<Option<UserDoc>, StoreError>>;
}
