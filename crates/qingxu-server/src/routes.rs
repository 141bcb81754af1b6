//! Route table and handlers.
//!
//! | Method | Path               | Handler   |
//! |--------|--------------------|-----------|
//! | POST   | `/emotion/analyze` | `analyze` |
//! | GET    | `/health`          | `health`  |
//! | GET    | `/swagger.json`    | `swagger` |

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{DefaultBodyLimit, State};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use qingxu_core::{AnalysisError, AnalyzeRequest, EmotionAnalysis, HealthStatus};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::context::InferenceContext;
use crate::openapi;

pub fn router(ctx: Arc<InferenceContext>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/emotion/analyze", post(analyze))
        .route("/health", get(health))
        .route("/swagger.json", get(swagger))
        // Long texts are truncated by the encoder, so the body size is not capped.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(ctx)
}

async fn analyze(
    State(ctx): State<Arc<InferenceContext>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EmotionAnalysis>, ApiError> {
    let Json(body) = body.map_err(|e| AnalysisError::InvalidRequest(e.body_text()))?;
    let request = AnalyzeRequest::from_json(&body)?;

    // Never log the text itself.
    let chars = request.text.chars().count();
    let started = Instant::now();

    let analysis = tokio::task::spawn_blocking(move || ctx.analyze(&request.text))
        .await
        .map_err(|e| AnalysisError::Inference(format!("inference task failed: {e}")))??;

    info!(
        chars,
        emotion = analysis.emotion.index(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "analyzed text"
    );
    Ok(Json(analysis))
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

async fn swagger() -> Json<Value> {
    Json(openapi::document())
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Maps [`AnalysisError`] onto a JSON error response.
#[derive(Debug)]
pub struct ApiError(AnalysisError);

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            warn!(error = %self.0, "rejected request");
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self.0, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = ErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
