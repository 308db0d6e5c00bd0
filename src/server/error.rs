//! HTTP mapping for planning errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::warn;

use crate::types::QuestError;

pub const MALFORMED_BODY: &str = "请求体不是合法的 JSON";
pub const MODEL_FAILURE: &str = "模型调用失败";
pub const NOT_FOUND: &str = "Not Found";

/// Error returned from API handlers
#[derive(Debug)]
pub enum ApiError {
    MalformedBody,
    NotFound,
    Plan(QuestError),
}

impl From<QuestError> for ApiError {
    fn from(err: QuestError) -> Self {
        ApiError::Plan(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MalformedBody => (StatusCode::BAD_REQUEST, json!({ "error": MALFORMED_BODY })),
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": NOT_FOUND })),
            ApiError::Plan(err @ QuestError::EmptyQuestion) => {
                (StatusCode::BAD_REQUEST, json!({ "error": err.to_string() }))
            }
            ApiError::Plan(err @ QuestError::ProviderNotConfigured { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": err.to_string() }),
            ),
            ApiError::Plan(err @ QuestError::Unparseable { raw }) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": err.to_string(), "raw": raw }),
            ),
            ApiError::Plan(err) => {
                warn!("Planning failed: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": MODEL_FAILURE, "detail": err.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
