//! Document store error types.

/// Errors that can occur when reading from the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check DOC_STORE_TOKEN")]
    Unauthorized,

    /// Store returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a document
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read a document from disk
    #[error("I/O error: {message}")]
    Io { message: String },
}
