//! Liveness and dataset readiness.

use axum::{extract::State, response::Json};
use genenet_common::ServerStatus;
use serde_json::{json, Value};

use crate::state::SharedState;

/// GET / — liveness message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Gene Network API is running" }))
}

/// GET /status/ — which reference files are loaded and how many rows each has
pub async fn status(State(state): State<SharedState>) -> Json<ServerStatus> {
    Json(state.datasets.status())
}
