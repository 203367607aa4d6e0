//! Scene generation orchestration.

use crate::error::{ApiError, ApiResult};
use atelier_core::{AssetId, SceneAsset, prompt};
use atelier_store::{CharacterStore, SceneRecord, SceneStore};
use atelier_synthesis::{SynthesisGateway, SynthesisRequest};
use std::sync::Arc;

/// Drives scene creation: character resolution, artifact precondition
/// checks, synthesis conditioned on the character image, and the metadata
/// commit.
pub struct SceneOrchestrator {
    characters: Arc<CharacterStore>,
    scenes: Arc<SceneStore>,
    gateway: Arc<SynthesisGateway>,
}

impl SceneOrchestrator {
    pub fn new(
        characters: Arc<CharacterStore>,
        scenes: Arc<SceneStore>,
        gateway: Arc<SynthesisGateway>,
    ) -> Self {
        Self {
            characters,
            scenes,
            gateway,
        }
    }

    /// Generate a scene placing `character_id` into `plot_description`.
    ///
    /// Both preconditions are checked before any synthesis work starts: the
    /// character must have a metadata record, and its primary image artifact
    /// must still exist on disk. The two failures are reported distinctly so
    /// a client can tell a bad id from a damaged data directory.
    pub async fn create(
        &self,
        character_id: AssetId,
        plot_description: &str,
    ) -> ApiResult<SceneAsset> {
        let character = self
            .characters
            .get(character_id)
            .await
            .ok_or(ApiError::UnknownCharacter(character_id))?;

        let character_image = self.characters.primary_path(character_id);
        if !character_image.exists() {
            return Err(ApiError::MissingCharacterArtifact(character_id));
        }

        let id = AssetId::generate();
        let request = SynthesisRequest::scene(
            prompt::scene_prompt(&character.description, plot_description),
            prompt::NEGATIVE_PROMPT,
        );
        let output = self.scenes.primary_path(id);

        let result = self
            .gateway
            .generate_scene(&request, &character_image, &output)
            .await?;

        let asset = self
            .scenes
            .insert(SceneRecord::new(
                id,
                character_id,
                plot_description.to_string(),
            ))
            .await?;

        tracing::info!(
            scene_id = %id,
            character_id = %character_id,
            provenance = ?result.provenance,
            "scene generated"
        );
        Ok(asset)
    }
}
