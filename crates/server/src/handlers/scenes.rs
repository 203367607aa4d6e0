//! Scene handlers.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use atelier_core::{AssetId, SceneAsset};
use axum::Json;
use axum::extract::State;
use serde::Deserialize;

/// Request body for scene creation.
#[derive(Debug, Deserialize)]
pub struct CreateSceneRequest {
    /// Id of an existing character to place in the scene.
    pub character_id: String,
    #[serde(default)]
    pub plot_description: String,
}

/// List all scenes.
///
/// GET /api/scenes
pub async fn list_scenes(State(state): State<AppState>) -> Json<Vec<SceneAsset>> {
    Json(state.scenes.list().await)
}

/// Generate a new scene for an existing character.
///
/// POST /api/scenes
pub async fn create_scene(
    State(state): State<AppState>,
    Json(request): Json<CreateSceneRequest>,
) -> ApiResult<Json<SceneAsset>> {
    // A non-uuid id can never name a character, so it fails validation the
    // same way an unknown uuid would, just with a clearer message.
    let character_id: AssetId = request
        .character_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid character id: {}", request.character_id)))?;

    let asset = state
        .scene_gen
        .create(character_id, &request.plot_description)
        .await?;
    Ok(Json(asset))
}
