mod closest;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use megrash_core::{AppConfig, Court, QueryError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{handle_panic, request_id, RequestId};

/// Shared per-process state. The court snapshot is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub courts: Arc<[Court]>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(courts: Vec<Court>, config: Arc<AppConfig>) -> Self {
        Self {
            courts: courts.into(),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

/// Error body returned to clients: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    code: &'static str,
    pub error: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "bad_request",
            error: message.into(),
        }
    }

    /// Opaque server-side failure; never carries internal details.
    pub fn internal() -> Self {
        Self {
            code: "internal_error",
            error: "internal server error".to_string(),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = if self.code == "bad_request" {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    courts_loaded: usize,
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn with_layers(router: Router<AppState>, cors: CorsLayer) -> Router<AppState> {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(axum::middleware::from_fn(request_id)),
    )
}

pub fn build_app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/closest", post(closest::closest_courts));

    with_layers(routes, build_cors(&state.config.cors_origins)).with_state(state)
}

async fn root() -> &'static str {
    "Welcome to the MeGrash sports court API"
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            courts_loaded: state.courts.len(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
