use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use coinlens_core::{detect_image_mime, CoinError, SessionState};
use coinlens_format::format_blocks;

use crate::controller::Controller;

/// Shared application state for API handlers.
pub struct AppState {
    pub controller: Controller,
}

type ApiError = (StatusCode, Json<Value>);

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/assets/default-coin.png", get(default_asset))
        .route("/api/health", get(health))
        .route("/api/analysis", get(get_analysis))
        .route("/api/upload", post(upload))
        .route("/api/reanalyze", post(reanalyze))
        // Above the 20 MiB cap so oversized uploads reach our own
        // validation instead of axum's body limit.
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
        .with_state(state)
}

/// The single-page view: file picker plus the rendered analysis.
async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// Serve the bundled sample image at its fixed path.
async fn default_asset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let path = state.controller.asset_path();
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let mime = detect_image_mime(path).unwrap_or("image/png");
            ([(header::CONTENT_TYPE, mime)], bytes).into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "coinlens" }))
}

/// Current session state with the analysis rendered to display blocks.
async fn get_analysis(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(session_json(&state.controller.snapshot().await))
}

/// Accept a multipart photo upload, validate it, and analyze it.
async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|_| CoinError::Validation("read failed".to_string()))
        .map_err(error_response)?
        .ok_or_else(|| error_response(CoinError::Validation("missing file field".to_string())))?;

    let content_type = field.content_type().unwrap_or("").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|_| CoinError::Validation("read failed".to_string()))
        .map_err(error_response)?;

    state
        .controller
        .handle_upload(&content_type, &bytes)
        .await
        .map_err(error_response)?;

    Ok(Json(session_json(&state.controller.snapshot().await)))
}

/// Re-run analysis on the currently loaded image.
async fn reanalyze(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    state.controller.reanalyze().await.map_err(error_response)?;
    Ok(Json(session_json(&state.controller.snapshot().await)))
}

fn session_json(state: &SessionState) -> Value {
    json!({
        "analysis_text": state.analysis_text,
        "blocks": format_blocks(&state.analysis_text),
        "is_loading": state.is_loading,
        "error_message": state.error_message,
        "image_data_uri": state.image.as_ref().map(|i| i.data_uri()),
    })
}

/// Map the error taxonomy onto HTTP statuses. The session stays usable
/// after every failure, so nothing here is fatal.
fn error_response(err: CoinError) -> ApiError {
    let status = match err {
        CoinError::Validation(_) => StatusCode::BAD_REQUEST,
        CoinError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CoinError::Analyzer(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({ "error": err.user_message() })))
}
