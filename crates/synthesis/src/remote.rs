//! Client for an A1111-style Stable Diffusion HTTP API.
//!
//! The full-fidelity backend runs out of process; this client speaks its
//! `/sdapi/v1` surface. Images travel base64-encoded in JSON payloads.

use crate::error::{SynthesisError, SynthesisResult};
use crate::request::SynthesisRequest;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Sampling steps requested from the backend.
const STEPS: u32 = 28;

/// How strongly img2img may diverge from the conditioning image.
const DENOISING_STRENGTH: f32 = 0.6;

#[derive(Debug, Serialize)]
struct Txt2ImgPayload<'a> {
    prompt: &'a str,
    negative_prompt: &'a str,
    width: u32,
    height: u32,
    steps: u32,
}

#[derive(Debug, Serialize)]
struct Img2ImgPayload<'a> {
    prompt: &'a str,
    negative_prompt: &'a str,
    width: u32,
    height: u32,
    steps: u32,
    init_images: Vec<String>,
    denoising_strength: f32,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    images: Vec<String>,
}

/// Remote synthesis client.
pub struct RemoteSynthesizer {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteSynthesizer {
    /// Connect to the backend and verify it answers.
    ///
    /// The probe keeps lazy gateway initialization honest: a dead backend
    /// fails here instead of on the first generation call.
    pub async fn connect(base_url: &str, timeout: Duration) -> SynthesisResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let probe = format!("{base_url}/sdapi/v1/sd-models");
        client.get(&probe).send().await?.error_for_status()?;

        tracing::info!(base_url, "connected to synthesis backend");
        Ok(Self { client, base_url })
    }

    /// Text-to-image generation; writes the result to `output`.
    pub async fn txt2img(&self, request: &SynthesisRequest, output: &Path) -> SynthesisResult<()> {
        let payload = Txt2ImgPayload {
            prompt: &request.prompt,
            negative_prompt: &request.negative_prompt,
            width: request.width,
            height: request.height,
            steps: STEPS,
        };

        let url = format!("{}/sdapi/v1/txt2img", self.base_url);
        let response: GenerationResponse = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        self.write_first_image(&response, output).await
    }

    /// Image-conditioned generation; `init_image` is sent as the base image.
    pub async fn img2img(
        &self,
        request: &SynthesisRequest,
        init_image: &Path,
        output: &Path,
    ) -> SynthesisResult<()> {
        let init = tokio::fs::read(init_image).await?;
        let payload = Img2ImgPayload {
            prompt: &request.prompt,
            negative_prompt: &request.negative_prompt,
            width: request.width,
            height: request.height,
            steps: STEPS,
            init_images: vec![BASE64.encode(init)],
            denoising_strength: DENOISING_STRENGTH,
        };

        let url = format!("{}/sdapi/v1/img2img", self.base_url);
        let response: GenerationResponse = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        self.write_first_image(&response, output).await
    }

    async fn write_first_image(
        &self,
        response: &GenerationResponse,
        output: &Path,
    ) -> SynthesisResult<()> {
        let encoded = response
            .images
            .first()
            .ok_or_else(|| SynthesisError::Protocol("backend returned no images".to_string()))?;
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| SynthesisError::Protocol(format!("invalid image payload: {e}")))?;

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output, bytes).await?;
        Ok(())
    }
}
