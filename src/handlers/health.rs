use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "synapse-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.store.is_ready().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "data_dir": "ok" },
            })),
        )
    } else {
        tracing::warn!(data_dir = %state.store.data_dir().display(), "Data directory unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "checks": { "data_dir": "missing" },
            })),
        )
    }
}
