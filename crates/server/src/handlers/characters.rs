//! Character CRUD handlers.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use atelier_core::{AssetId, CharacterAsset};
use axum::Json;
use axum::extract::{Multipart, Path, State};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Fields accepted by the character create/update multipart forms.
const DESCRIPTION_FIELD: &str = "description";
const REFERENCE_FIELD: &str = "reference_image";
const NEW_IMAGE_FIELD: &str = "new_image";

/// List all characters.
///
/// GET /api/characters
pub async fn list_characters(State(state): State<AppState>) -> Json<Vec<CharacterAsset>> {
    Json(state.characters.list().await)
}

/// Generate a new character from a multipart form: a required `description`
/// text field and an optional `reference_image` file.
///
/// POST /api/characters
pub async fn create_character(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<CharacterAsset>> {
    let CharacterForm {
        description,
        staged_image,
    } = CharacterForm::read(&state, multipart, REFERENCE_FIELD).await?;

    let Some(description) = description.filter(|d| !d.trim().is_empty()) else {
        cleanup_staged(staged_image).await;
        return Err(ApiError::BadRequest("description is required".to_string()));
    };

    let result = state
        .character_gen
        .create(&description, staged_image.as_deref())
        .await;
    cleanup_staged(staged_image).await;
    result.map(Json)
}

/// Partially update a character: either field may be omitted. A supplied
/// `new_image` replaces the artifact directly without re-synthesis.
///
/// PUT /api/characters/{id}
pub async fn update_character(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<CharacterAsset>> {
    let id = parse_id(&id)?;
    let CharacterForm {
        description,
        staged_image,
    } = CharacterForm::read(&state, multipart, NEW_IMAGE_FIELD).await?;

    let result = state
        .characters
        .update(id, description, staged_image.as_deref())
        .await;
    cleanup_staged(staged_image).await;

    match result? {
        Some(asset) => Ok(Json(asset)),
        None => Err(ApiError::NotFound(format!("character {id}"))),
    }
}

/// Delete a character and its artifacts.
///
/// DELETE /api/characters/{id}
pub async fn delete_character(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    if state.characters.delete(id).await? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::NotFound(format!("character {id}")))
    }
}

fn parse_id(raw: &str) -> ApiResult<AssetId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid asset id: {raw}")))
}

/// Decoded multipart form with any uploaded image staged in the temp
/// directory.
struct CharacterForm {
    description: Option<String>,
    staged_image: Option<PathBuf>,
}

impl CharacterForm {
    /// Drain the multipart stream. Only `description` and the route's image
    /// field (`reference_image` on create, `new_image` on update) are
    /// honored; other fields are skipped and an empty file part counts as
    /// absent.
    async fn read(
        state: &AppState,
        mut multipart: Multipart,
        image_field: &str,
    ) -> ApiResult<Self> {
        let mut form = Self {
            description: None,
            staged_image: None,
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if name == DESCRIPTION_FIELD {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("unreadable field: {e}")))?;
                form.description = Some(text);
            } else if name == image_field {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("unreadable field: {e}")))?;
                if data.is_empty() {
                    continue;
                }
                let path = state
                    .config
                    .data
                    .temp_dir()
                    .join(format!("{}.png", uuid::Uuid::new_v4()));
                tokio::fs::write(&path, &data).await?;
                form.staged_image = Some(path);
            }
        }

        Ok(form)
    }
}

/// Remove a staged upload. Best-effort: a leftover temp file is not worth
/// failing the request over.
async fn cleanup_staged(staged: Option<PathBuf>) {
    if let Some(path) = staged {
        if let Err(err) = tokio::fs::remove_file(&path).await {
            tracing::debug!(path = %path.display(), error = %err, "temp upload cleanup failed");
        }
    }
}
