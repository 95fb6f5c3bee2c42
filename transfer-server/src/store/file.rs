//! Document store backed by a directory of JSON files.
//!
//! Useful for development and testing without store credentials. Expects
//! `systems/{id}.json` and `users/{id}.json` under the root directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{SystemDoc, SystemId, UserDoc, UserId};

use super::DocumentStore;
use super::error::StoreError;

/// Reads documents from JSON files on disk.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    root: PathBuf,
}

impl FileDocumentStore {
    /// Create a store rooted at the given directory.
    ///
    /// Fails if the directory does not exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();

        if !root.is_dir() {
            return Err(StoreError::Io {
                message: format!("document directory not found: {}", root.display()),
            });
        }

        Ok(Self { root })
    }

    fn document_path(&self, collection: &str, id: &str) -> PathBuf {
        self.root.join(collection).join(format!("{id}.json"))
    }

    /// Read a document, mapping a missing file to `None`.
    async fn read<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let path = self.document_path(collection, id);
        debug!(path = %path.display(), "reading document");

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io {
                    message: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        let doc = serde_json::from_str(&contents).map_err(|e| StoreError::Json {
            message: format!("{}: {}", path.display(), e),
        })?;

        Ok(Some(doc))
    }
}

impl DocumentStore for FileDocumentStore {
    fn get_system_doc_data<'a>(
        &'a self,
        system_id: &'a SystemId,
    ) -> BoxFuture<'a, Result<Option<SystemDoc>, StoreError>> {
        self.read("systems", system_id.as_str()).boxed()
    }

    fn get_user_doc_data<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, Result<Option<UserDoc>, StoreError>> {
        self.read("users", user_id.as_str()).boxed()
    }
}
