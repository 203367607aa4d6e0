//! HTTP API server for Atelier.
//!
//! This crate provides the HTTP control plane:
//! - Capability status and provisioning endpoints
//! - Character create/list/update/delete
//! - Scene create/list
//! - Static artifact serving
//!
//! plus the generation orchestrators that compose the synthesis gateway
//! with the asset stores.

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod orchestrator;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use orchestrator::{CharacterOrchestrator, SceneOrchestrator};
pub use routes::create_router;
pub use state::AppState;
