use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// `GET /healthz`, liveness.
pub async fn healthz() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// `GET /readyz`, readiness. A service that gates readiness on its own
/// dependencies mounts a handler of its own instead of this one.
pub async fn readyz() -> Json<Health> {
    Json(Health { status: "ok" })
}
