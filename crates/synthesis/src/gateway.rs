//! The synthesis gateway: one interface over both generation paths.

use crate::error::{SynthesisError, SynthesisResult};
use crate::placeholder::{PlaceholderRenderer, PlaceholderSpec, RenderLabel};
use crate::remote::RemoteSynthesizer;
use crate::request::{Provenance, SynthesisOutput, SynthesisRequest};
use atelier_core::config::{GenerationMode, SynthesisConfig};
use std::path::Path;
use tokio::sync::OnceCell;

/// Uniform interface over the underlying image generator.
///
/// The operating mode is fixed at construction. In `Full` mode the remote
/// backend is initialized lazily on first use; any initialization or
/// generation failure (including the per-request timeout) degrades to the
/// placeholder path rather than propagating. Callers therefore only ever see
/// an error when local placeholder rendering itself fails.
pub struct SynthesisGateway {
    config: SynthesisConfig,
    placeholder: PlaceholderRenderer,
    remote: OnceCell<RemoteSynthesizer>,
}

impl SynthesisGateway {
    pub fn new(config: SynthesisConfig) -> Self {
        Self {
            config,
            placeholder: PlaceholderRenderer::new(),
            remote: OnceCell::new(),
        }
    }

    /// The mode this gateway was constructed with.
    pub fn mode(&self) -> GenerationMode {
        self.config.mode
    }

    /// Generate from a text prompt alone.
    pub async fn generate_from_text(
        &self,
        request: &SynthesisRequest,
        output: &Path,
    ) -> SynthesisResult<SynthesisOutput> {
        if self.config.mode == GenerationMode::Full {
            match self
                .bounded(self.remote_txt2img(request, output))
                .await
            {
                Ok(()) => return Ok(SynthesisOutput {
                    provenance: Provenance::Real,
                }),
                Err(err) => warn_degraded("txt2img", &err),
            }
        }

        self.placeholder
            .render_to_file(
                PlaceholderSpec::new(request, RenderLabel::Character, None),
                output,
            )
            .await?;
        Ok(SynthesisOutput {
            provenance: Provenance::Placeholder,
        })
    }

    /// Generate conditioned on a reference image.
    pub async fn generate_from_reference(
        &self,
        request: &SynthesisRequest,
        reference: &Path,
        output: &Path,
    ) -> SynthesisResult<SynthesisOutput> {
        if self.config.mode == GenerationMode::Full {
            match self
                .bounded(self.remote_img2img(request, reference, output))
                .await
            {
                Ok(()) => return Ok(SynthesisOutput {
                    provenance: Provenance::Real,
                }),
                Err(err) => warn_degraded("img2img", &err),
            }
        }

        self.placeholder
            .render_to_file(
                PlaceholderSpec::new(request, RenderLabel::Character, Some(reference)),
                output,
            )
            .await?;
        Ok(SynthesisOutput {
            provenance: Provenance::Placeholder,
        })
    }

    /// Generate a scene conditioned on an existing character image.
    pub async fn generate_scene(
        &self,
        request: &SynthesisRequest,
        character_image: &Path,
        output: &Path,
    ) -> SynthesisResult<SynthesisOutput> {
        if self.config.mode == GenerationMode::Full {
            match self
                .bounded(self.remote_img2img(request, character_image, output))
                .await
            {
                Ok(()) => return Ok(SynthesisOutput {
                    provenance: Provenance::Real,
                }),
                Err(err) => warn_degraded("scene img2img", &err),
            }
        }

        self.placeholder
            .render_to_file(
                PlaceholderSpec::new(request, RenderLabel::Scene, None),
                output,
            )
            .await?;
        Ok(SynthesisOutput {
            provenance: Provenance::Placeholder,
        })
    }

    async fn remote_txt2img(&self, request: &SynthesisRequest, output: &Path) -> SynthesisResult<()> {
        let remote = self.remote_client().await?;
        remote.txt2img(request, output).await
    }

    async fn remote_img2img(
        &self,
        request: &SynthesisRequest,
        init_image: &Path,
        output: &Path,
    ) -> SynthesisResult<()> {
        let remote = self.remote_client().await?;
        remote.img2img(request, init_image, output).await
    }

    /// Bound a full-fidelity attempt to the configured request timeout.
    async fn bounded<F>(&self, attempt: F) -> SynthesisResult<()>
    where
        F: std::future::Future<Output = SynthesisResult<()>>,
    {
        let timeout = self.config.request_timeout();
        match tokio::time::timeout(timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(SynthesisError::Timeout(timeout)),
        }
    }

    /// Lazily initialize the remote client. A failed init leaves the cell
    /// unset so a later call can retry once the backend comes up.
    async fn remote_client(&self) -> SynthesisResult<&RemoteSynthesizer> {
        self.remote
            .get_or_try_init(|| {
                RemoteSynthesizer::connect(&self.config.api_url, self.config.request_timeout())
            })
            .await
    }
}

fn warn_degraded(operation: &str, err: &SynthesisError) {
    tracing::warn!(
        operation,
        error = %err,
        "full-fidelity generation failed, falling back to placeholder"
    );
}
