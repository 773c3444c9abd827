use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "outreach"
    }))
}

/// GET /
/// Public landing payload. Signed-in users never reach it (see the guard).
pub async fn landing_handler() -> Json<Value> {
    Json(json!({
        "product": "HR outreach automation",
        "signup": "/auth/signup",
        "login": "/auth/login"
    }))
}
