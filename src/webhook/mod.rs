pub mod dedup;

use crate::bot::Dispatcher;
use crate::models::telegram::Update;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

pub use dedup::Dedup;

/// Shared by every webhook delivery
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub dedup: Arc<Dedup>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            dedup: Arc::new(Dedup::new()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// POST /webhook
///
/// 400 for a body that is not an update, 500 when the body cannot be read
/// or the reply cannot be delivered, 200 otherwise (duplicates included).
async fn webhook(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, (StatusCode, String)> {
    let body = body.map_err(internal_error)?;
    let update: Update = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejecting malformed update: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    if !state.dedup.admit(update.update_id) {
        debug!("Skipping already seen update {}", update.update_id);
        return Ok(StatusCode::OK);
    }

    let Some((chat_id, text)) = update.text_message() else {
        debug!("Update {} carries no text message", update.update_id);
        return Ok(StatusCode::OK);
    };

    info!("Update {} from chat {}", update.update_id, chat_id);
    state
        .dispatcher
        .handle_message(chat_id, text)
        .await
        .map_err(internal_error)?;

    Ok(StatusCode::OK)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "stay-pricer",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

fn internal_error<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!("internal error: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
