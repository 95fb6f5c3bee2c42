//! HTTP document store client.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{SystemDoc, SystemId, UserDoc, UserId};

use super::DocumentStore;
use super::error::StoreError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the HTTP document store.
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// Base URL; documents are read from `{base_url}/systems/{id}` and
    /// `{base_url}/users/{id}`
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpStoreConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Authenticate with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Document store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDocumentStore {
    /// Create a new client.
    pub fn new(config: HttpStoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.token {
            let value =
                HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| StoreError::Api {
                    status: 0,
                    message: "Invalid token format".to_string(),
                })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    /// GET a document, mapping 404 to `None`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let url = self.document_url(collection, id);
        debug!(%url, "fetching document");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let doc = serde_json::from_str(&body).map_err(|e| StoreError::Json {
            message: e.to_string(),
        })?;

        Ok(Some(doc))
    }
}

impl DocumentStore for HttpDocumentStore {
    fn get_system_doc_data<'a>(
        &'a self,
        system_id: &'a SystemId,
    ) -> BoxFuture<'a, Result<Option<SystemDoc>, StoreError>> {
        self.fetch("systems", system_id.as_str()).boxed()
    }

    fn get_user_doc_data<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, Result<Option<UserDoc>, StoreError>> {
        self.fetch("users", user_id.as_str()).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = HttpStoreConfig::new("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.token, None);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = HttpStoreConfig::new("http://localhost:8080/v1/");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn config_builders() {
        let config = HttpStoreConfig::new("http://localhost")
            .with_token("secret")
            .with_timeout(5);
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn document_urls() {
        let store = HttpDocumentStore::new(HttpStoreConfig::new("http://localhost/")).unwrap();
        assert_eq!(
            store.document_url("systems", "abc"),
            "http://localhost/systems/abc"
        );
    }

    #[test]
    fn rejects_invalid_token() {
        let config = HttpStoreConfig::new("http://localhost").with_token("bad\ntoken");
        assert!(matches!(
            HttpDocumentStore::new(config),
            Err(StoreError::Api { status: 0, .. })
        ));
    }
}
