use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{Method, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use super::{ApiError, AppState};
use crate::plan::{PlanRequest, PlanResponse};

pub fn router(state: AppState, body_limit: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/plan", post(handle_plan))
        .fallback(handle_not_found)
        .method_not_allowed_fallback(handle_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

async fn handle_plan(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanResponse>, ApiError> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            debug!("Rejected request body: {}", e);
            ApiError::MalformedBody
        })?
    };

    let request = PlanRequest::from_json(&value, state.default_provider);
    let response = state.planner.plan(&request).await?;
    Ok(Json(response))
}

async fn handle_not_found() -> ApiError {
    ApiError::NotFound
}
