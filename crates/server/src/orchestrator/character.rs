//! Character generation orchestration.

use crate::error::ApiResult;
use atelier_core::{AssetId, CharacterAsset, prompt};
use atelier_store::{CharacterRecord, CharacterStore};
use atelier_synthesis::{SynthesisGateway, SynthesisRequest};
use std::path::Path;
use std::sync::Arc;

/// Drives character creation end to end: prompt assembly, synthesis,
/// reference persistence, and the metadata commit.
pub struct CharacterOrchestrator {
    characters: Arc<CharacterStore>,
    gateway: Arc<SynthesisGateway>,
}

impl CharacterOrchestrator {
    pub fn new(characters: Arc<CharacterStore>, gateway: Arc<SynthesisGateway>) -> Self {
        Self {
            characters,
            gateway,
        }
    }

    /// Generate a character from a description, optionally conditioned on an
    /// uploaded reference image (already staged on disk by the handler).
    pub async fn create(
        &self,
        description: &str,
        reference_image: Option<&Path>,
    ) -> ApiResult<CharacterAsset> {
        let id = AssetId::generate();
        let request = SynthesisRequest::character(
            prompt::character_prompt(description),
            prompt::NEGATIVE_PROMPT,
        );
        let output = self.characters.primary_path(id);

        let result = match reference_image {
            Some(reference) => {
                self.gateway
                    .generate_from_reference(&request, reference, &output)
                    .await?
            }
            None => self.gateway.generate_from_text(&request, &output).await?,
        };

        // The reference is kept alongside the primary artifact so a later
        // regeneration can reuse it.
        if let Some(reference) = reference_image {
            self.characters.persist_reference(id, reference).await?;
        }

        let asset = self
            .characters
            .insert(CharacterRecord::new(
                id,
                description.to_string(),
                reference_image.is_some(),
            ))
            .await?;

        tracing::info!(
            character_id = %id,
            provenance = ?result.provenance,
            "character generated"
        );
        Ok(asset)
    }
}
