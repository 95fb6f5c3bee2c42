use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transfer_server::config::{ServerConfig, StoreConfig};
use transfer_server::store::{DocumentStore, FileDocumentStore, HttpDocumentStore, StoreError};
use transfer_server::transfers::TransferWorker;
use transfer_server::web::{AppState, create_router};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn open_store(config: StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let store: Arc<dyn DocumentStore> = match config {
        StoreConfig::Files(root) => {
            info!(root = %root.display(), "reading documents from disk");
            Arc::new(FileDocumentStore::new(root)?)
        }
        StoreConfig::Http(http) => {
            info!(base_url = %http.base_url, "reading documents over HTTP");
            Arc::new(HttpDocumentStore::new(http)?)
        }
    };

    Ok(store)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let store = match open_store(config.store) {
        Ok(store) => store,
        Err(e) => {
            error!("failed to open document store: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Single background worker shared by every request
    let worker = TransferWorker::spawn(&config.worker);

    let state = AppState::new(store, worker, &config.cache);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Transfer server listening on http://{}", config.addr);
    info!("  GET  /health                       - Health check");
    info!("  POST /transfers                    - Compute transfers for a snapshot");
    info!("  GET  /systems/:system_id           - Stored system");
    info!("  GET  /systems/:system_id/transfers - Transfers for a stored system");
    info!("  GET  /users/:user_id               - Stored user");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
