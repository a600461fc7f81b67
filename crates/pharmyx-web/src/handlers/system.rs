//! Liveness and status endpoints.

use axum::Json;
use serde_json::{json, Value};

/// GET / - Root banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "Pharmyx AI rodando 💥",
        "online": true,
    }))
}

/// GET /status - Health check
pub async fn status() -> Json<Value> {
    Json(json!({
        "ok": true,
        "API": "Pharmyx AI ativa e operacional",
    }))
}
