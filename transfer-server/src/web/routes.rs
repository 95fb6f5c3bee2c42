//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::cache::LookupError;
use crate::domain::{InvalidDocumentId, SystemDoc, SystemId, UserDoc, UserId};
use crate::store::StoreError;
use crate::transfers::{TransferReply, TransferRequest, WorkerError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/transfers", post(compute_transfers))
        .route("/systems/:system_id", get(get_system))
        .route("/systems/:system_id/transfers", get(system_transfers))
        .route("/users/:user_id", get(get_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Compute transfers for a snapshot posted by the caller.
async fn compute_transfers(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferReply>, AppError> {
    debug!(
        lines = request.lines.len(),
        stations = request.stations.len(),
        "computing transfers for posted snapshot"
    );

    let reply = state.worker.compute(request).await?;
    Ok(Json(reply))
}

/// Transfers for a stored system.
async fn system_transfers(
    State(state): State<AppState>,
    Path(system_id): Path<String>,
    Query(query): Query<SystemTransfersQuery>,
) -> Result<Json<SystemTransfersResponse>, AppError> {
    let system_id = SystemId::parse(&system_id)?;
    let min_lines = query.min_lines.unwrap_or(DEFAULT_MIN_LINES);

    let transfers = state
        .transfers
        .system_transfers(&system_id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("system not found: {system_id}"),
        })?;

    Ok(Json(SystemTransfersResponse {
        transfer_station_ids: transfers.transfer_station_ids(min_lines),
        transfers_by_station_id: (*transfers).clone(),
        system_id,
    }))
}

/// A stored system document.
async fn get_system(
    State(state): State<AppState>,
    Path(system_id): Path<String>,
) -> Result<Json<SystemDoc>, AppError> {
    let system_id = SystemId::parse(&system_id)?;

    let doc = state
        .store
        .get_system_doc_data(&system_id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("system not found: {system_id}"),
        })?;

    Ok(Json(doc))
}

/// A stored user document.
async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserDoc>, AppError> {
    let user_id = UserId::parse(&user_id)?;

    let doc = state
        .store
        .get_user_doc_data(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("user not found: {user_id}"),
        })?;

    Ok(Json(doc))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<InvalidDocumentId> for AppError {
    fn from(e: InvalidDocumentId) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<WorkerError> for AppError {
    fn from(e: WorkerError) -> Self {
        match e {
            WorkerError::Closed | WorkerError::Superseded { .. } => AppError::Unavailable {
                message: e.to_string(),
            },
            WorkerError::Panicked => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::Store(e) => e.into(),
            LookupError::Worker(e) => e.into(),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Unavailable { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            warn!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tempfile::{TempDir, tempdir};

    use crate::cache::CacheConfig;
    use crate::domain::{Line, LineId, Station, StationId};
    use crate::store::FileDocumentStore;
    use crate::transfers::{TransferWorker, WorkerConfig};

    const SYSTEM_JSON: &str = r#"{
        "systemId": "sys1",
        "userId": "u1",
        "title": "Test Metro",
        "lastUpdated": "2024-03-15T10:00:00Z",
        "map": {
            "lines": {
                "red": {"stationIds": ["A", "B", "C"]},
                "blue": {"stationIds": ["B", "D"]},
                "express": {"stationIds": ["A", "B", "D"], "waypointOverrides": ["B"]}
            },
            "stations": {
                "A": {"name": "Alpha"},
                "B": {"name": "Bravo"},
                "C": {"isWaypoint": true},
                "D": {"name": "Delta"}
            }
        }
    }"#;

    /// State backed by a temporary file store holding one system and user.
    fn state() -> (TempDir, AppState) {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("systems")).unwrap();
        std::fs::create_dir_all(dir.path().join("users")).unwrap();
        std::fs::write(dir.path().join("systems/sys1.json"), SYSTEM_JSON).unwrap();
        std::fs::write(
            dir.path().join("users/u1.json"),
            r#"{"userId": "u1", "displayName": "Ada", "systemIds": ["sys1"]}"#,
        )
        .unwrap();

        let store = Arc::new(FileDocumentStore::new(dir.path()).unwrap());
        let worker = TransferWorker::spawn(&WorkerConfig::default());
        let state = AppState::new(store, worker, &CacheConfig::default());
        (dir, state)
    }

    fn sid(s: &str) -> StationId {
        StationId::from(s)
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn posted_snapshot() {
        let (_dir, state) = state();

        let mut request = TransferRequest::default();
        request.stations.insert(sid("A"), Station::stop());
        request.stations.insert(sid("B"), Station::stop());
        request
            .lines
            .insert(LineId::from("L1"), Line::through(["A", "B", "X"]));

        let Json(reply) = compute_transfers(State(state), Json(request))
            .await
            .unwrap();

        assert_eq!(reply.transfers_by_station_id.len(), 2);
        assert!(reply.transfers_by_station_id.lines_at(&sid("X")).is_none());
    }

    #[tokio::test]
    async fn stored_system_transfers() {
        let (_dir, state) = state();

        let Json(response) = system_transfers(
            State(state),
            Path("sys1".to_string()),
            Query(SystemTransfersQuery::default()),
        )
        .await
        .unwrap();

        let at = |id: &str| {
            response
                .transfers_by_station_id
                .lines_at(&sid(id))
                .unwrap()
                .iter()
                .map(LineId::as_str)
                .collect::<Vec<_>>()
        };

        assert_eq!(at("A"), vec!["express", "red"]);
        assert_eq!(at("B"), vec!["blue", "red"]);
        assert!(at("C").is_empty());
        assert_eq!(at("D"), vec!["blue", "express"]);
        assert_eq!(response.transfer_station_ids, vec![sid("A"), sid("B"), sid("D")]);
    }

    #[tokio::test]
    async fn min_lines_threshold() {
        let (_dir, state) = state();

        let Json(response) = system_transfers(
            State(state),
            Path("sys1".to_string()),
            Query(SystemTransfersQuery { min_lines: Some(1) }),
        )
        .await
        .unwrap();

        assert_eq!(
            response.transfer_station_ids,
            vec![sid("A"), sid("B"), sid("D")]
        );
        assert_eq!(response.system_id.as_str(), "sys1");
    }

    #[tokio::test]
    async fn unknown_system_is_not_found() {
        let (_dir, state) = state();

        let err = system_transfers(
            State(state),
            Path("missing".to_string()),
            Query(SystemTransfersQuery::default()),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_system_id_is_bad_request() {
        let (_dir, state) = state();

        let err = get_system(State(state), Path("a.b".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn stored_documents() {
        let (_dir, state) = state();

        let Json(system) = get_system(State(state.clone()), Path("sys1".to_string()))
            .await
            .unwrap();
        assert_eq!(system.title.as_deref(), Some("Test Metro"));

        let Json(user) = get_user(State(state.clone()), Path("u1".to_string()))
            .await
            .unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Ada"));

        let err = get_user(State(state), Path("u2".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn worker_errors_map_to_status() {
        let err = AppError::from(WorkerError::Closed);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = AppError::from(WorkerError::Superseded { seq: 1, latest: 2 });
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = AppError::from(WorkerError::Panicked);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(LookupError::Store(StoreError::Unauthorized));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_status() {
        let response = AppError::NotFound {
            message: "gone".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
