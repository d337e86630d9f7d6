//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::{error, warn};

use crate::domain::Criterion;
use crate::planner::{Planner, PlannerError};
use crate::repository::{Repository, RepositoryError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops", get(list_stops))
        .route("/api/paths", get(find_paths))
        .route("/api/path", get(path_details))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Run synchronous planner work off the async runtime.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal {
            message: format!("query task failed: {e}"),
        })?
}

/// Every stop with its attributes, in load order.
async fn list_stops(State(state): State<AppState>) -> Result<Json<StopsResponse>, AppError> {
    run_blocking(move || {
        let repository = state.repository.as_ref();
        let mut stops = Vec::new();
        for code in repository.stop_codes()? {
            stops.push(StopResult::from(repository.stop(&code)?.as_ref()));
        }
        Ok(StopsResponse { stops })
    })
    .await
    .map(Json)
}

/// Ranked itineraries between two stops.
async fn find_paths(
    State(state): State<AppState>,
    Query(req): Query<PathsRequest>,
) -> Result<Json<PathsResponse>, AppError> {
    let criterion = req
        .criterion
        .unwrap_or_else(|| Criterion::Distance.as_str().to_string());

    run_blocking(move || {
        // Repairs stay local to this query
        let mut graph = state.graph.as_ref().clone();
        let planner = Planner::new(state.repository.as_ref(), state.config.as_ref());
        let itineraries =
            planner.find_ranked_paths(&mut graph, &req.origin, &req.destination, &criterion)?;

        Ok(PathsResponse {
            criterion,
            itineraries: itineraries.iter().map(ItineraryResult::from).collect(),
        })
    })
    .await
    .map(Json)
}

/// Itineraries along one explicit path.
async fn path_details(
    State(state): State<AppState>,
    Query(req): Query<PathDetailsRequest>,
) -> Result<Json<PathsResponse>, AppError> {
    let stops = parse_path_param(&req.path);

    run_blocking(move || {
        let planner = Planner::new(state.repository.as_ref(), state.config.as_ref());
        let itineraries = planner.path_details(&stops, req.distance)?;

        Ok(PathsResponse {
            criterion: Criterion::Distance.to_string(),
            itineraries: itineraries.iter().map(ItineraryResult::from).collect(),
        })
    })
    .await
    .map(Json)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::StopNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<PlannerError> for AppError {
    fn from(e: PlannerError) -> Self {
        match e {
            PlannerError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            PlannerError::InvalidArgument(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(status = %status, error = %message, "Request failed");
        } else {
            warn!(status = %status, error = %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
