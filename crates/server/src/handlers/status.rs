//! Capability status and provisioning handlers.

use crate::state::AppState;
use atelier_provision::{InstallAck, InstallScope, StatusReport};
use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

/// Health check endpoint. Intentionally does not touch the stores or the
/// tracker; it answers as long as the process is serving requests.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Report per-capability and aggregate readiness.
///
/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(state.tracker.get_status().await)
}

/// Request body for the install trigger. The scope defaults to everything.
#[derive(Debug, Deserialize)]
pub struct InstallRequest {
    #[serde(rename = "type", default = "default_scope")]
    pub scope: InstallScope,
}

fn default_scope() -> InstallScope {
    InstallScope::All
}

/// Trigger background provisioning and return immediately. A missing body
/// means "install everything".
///
/// POST /api/dependencies/install
pub async fn install_dependencies(
    State(state): State<AppState>,
    request: Option<Json<InstallRequest>>,
) -> Json<InstallAck> {
    let scope = request.map_or(InstallScope::All, |Json(r)| r.scope);
    Json(state.tracker.install(scope).await)
}
