//! Server configuration.
//!
//! Read from environment variables at startup. Every setting has a default
//! except the document store, which must be given either as a directory of
//! JSON files (`DOC_STORE_DIR`) or an HTTP base URL (`DOC_STORE_URL`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::store::HttpStoreConfig;
use crate::transfers::WorkerConfig;

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Errors from reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    /// Neither DOC_STORE_DIR nor DOC_STORE_URL was set
    #[error("no document store configured: set DOC_STORE_DIR or DOC_STORE_URL")]
    MissingStore,
}

/// Where documents are read from.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// Directory of JSON files.
    Files(PathBuf),
    /// HTTP document store.
    Http(HttpStoreConfig),
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub store: StoreConfig,
    pub cache: CacheConfig,
    pub worker: WorkerConfig,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = match lookup("TRANSFER_ADDR") {
            Some(value) => parse_var("TRANSFER_ADDR", value)?,
            None => DEFAULT_ADDR
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "TRANSFER_ADDR",
                    value: DEFAULT_ADDR.to_string(),
                })?,
        };

        let store = if let Some(dir) = lookup("DOC_STORE_DIR") {
            StoreConfig::Files(PathBuf::from(dir))
        } else if let Some(url) = lookup("DOC_STORE_URL") {
            let mut config = HttpStoreConfig::new(url);
            if let Some(token) = lookup("DOC_STORE_TOKEN") {
                config = config.with_token(token);
            }
            StoreConfig::Http(config)
        } else {
            return Err(ConfigError::MissingStore);
        };

        let mut cache = CacheConfig::default();
        if let Some(value) = lookup("TRANSFER_CACHE_TTL_SECS") {
            cache.ttl = Duration::from_secs(parse_var("TRANSFER_CACHE_TTL_SECS", value)?);
        }
        if let Some(value) = lookup("TRANSFER_CACHE_CAPACITY") {
            cache.max_capacity = parse_var("TRANSFER_CACHE_CAPACITY", value)?;
        }

        let mut worker = WorkerConfig::default();
        if let Some(value) = lookup("TRANSFER_QUEUE_DEPTH") {
            worker = worker.with_queue_depth(parse_var("TRANSFER_QUEUE_DEPTH", value)?);
        }

        Ok(Self {
            addr,
            store,
            cache,
            worker,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { var, value })
}
