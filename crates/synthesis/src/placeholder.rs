//! Deterministic placeholder rendering.
//!
//! Used whenever the full-fidelity backend is unavailable or fails. The
//! output is intentionally distinguishable from real generations: a light
//! grid over a flat canvas, a banner with the prompt text, and (for
//! reference-conditioned calls) a thumbnail of the reference in the corner.

use crate::error::{SynthesisError, SynthesisResult};
use crate::request::SynthesisRequest;
use ab_glyph::{FontVec, PxScale};
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut,
};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CANVAS: Rgb<u8> = Rgb([240, 240, 240]);
const GRID: Rgb<u8> = Rgb([230, 230, 230]);
const FRAME: Rgb<u8> = Rgb([200, 200, 200]);
const BANNER: Rgb<u8> = Rgb([255, 255, 255]);
const TEXT: Rgb<u8> = Rgb([0, 0, 0]);
const NOTICE: Rgb<u8> = Rgb([255, 0, 0]);
const CHARACTER_LABEL: Rgb<u8> = Rgb([0, 128, 0]);
const SCENE_LABEL: Rgb<u8> = Rgb([0, 0, 255]);

/// Grid cell size in pixels.
const GRID_STEP: u32 = 50;

/// Prompts longer than this are truncated on the banner.
const MAX_PROMPT_CHARS: usize = 100;

/// Bounding size for the reference thumbnail.
const REF_SIZE: u32 = 150;

/// Candidate system font paths, tried in order.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

/// Mode label rendered on the placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderLabel {
    Character,
    Scene,
}

/// What to render. Owned so the render can run on a blocking thread.
#[derive(Clone, Debug)]
pub struct PlaceholderSpec {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub label: RenderLabel,
    pub reference: Option<PathBuf>,
}

impl PlaceholderSpec {
    /// Build a spec from a synthesis request.
    pub fn new(request: &SynthesisRequest, label: RenderLabel, reference: Option<&Path>) -> Self {
        Self {
            prompt: request.prompt.clone(),
            width: request.width,
            height: request.height,
            label,
            reference: reference.map(Path::to_path_buf),
        }
    }
}

/// Deterministic placeholder renderer.
///
/// Font discovery happens once at construction; when no system font is
/// found the banner text is skipped and the rest of the placeholder still
/// renders.
pub struct PlaceholderRenderer {
    font: Arc<Option<FontVec>>,
}

impl PlaceholderRenderer {
    pub fn new() -> Self {
        let font = load_system_font();
        if font.is_none() {
            tracing::warn!("no system font found, placeholder text will be skipped");
        }
        Self {
            font: Arc::new(font),
        }
    }

    /// Render the placeholder and write it as PNG to `output`.
    pub async fn render_to_file(
        &self,
        spec: PlaceholderSpec,
        output: &Path,
    ) -> SynthesisResult<()> {
        let font = self.font.clone();
        let output = output.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let image = render(&spec, font.as_ref().as_ref());
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            image.save(&output)?;
            Ok(())
        })
        .await
        .map_err(|e| {
            SynthesisError::Io(std::io::Error::other(format!("render task failed: {e}")))
        })?
    }
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn load_system_font() -> Option<FontVec> {
    for path in FONT_PATHS {
        if let Ok(data) = std::fs::read(path) {
            match FontVec::try_from_vec(data) {
                Ok(font) => return Some(font),
                Err(_) => tracing::warn!(path, "unreadable font file, trying next candidate"),
            }
        }
    }
    None
}

fn render(spec: &PlaceholderSpec, font: Option<&FontVec>) -> RgbImage {
    let (width, height) = (spec.width, spec.height);
    let mut canvas = RgbImage::from_pixel(width, height, CANVAS);

    if let Some(font) = font {
        draw_banner(&mut canvas, spec, font);
    }

    if let Some(reference) = &spec.reference {
        paste_reference(&mut canvas, reference);
    }

    // The grid goes on last, over banner and thumbnail alike.
    for x in (0..width).step_by(GRID_STEP as usize) {
        draw_line_segment_mut(
            &mut canvas,
            (x as f32, 0.0),
            (x as f32, height as f32),
            GRID,
        );
    }
    for y in (0..height).step_by(GRID_STEP as usize) {
        draw_line_segment_mut(&mut canvas, (0.0, y as f32), (width as f32, y as f32), GRID);
    }

    canvas
}

fn draw_banner(canvas: &mut RgbImage, spec: &PlaceholderSpec, font: &FontVec) {
    let (width, height) = canvas.dimensions();
    if width <= 20 || height <= 130 {
        return;
    }

    draw_filled_rect_mut(canvas, Rect::at(10, 10).of_size(width - 20, 110), BANNER);
    draw_hollow_rect_mut(canvas, Rect::at(10, 10).of_size(width - 20, 110), FRAME);

    let scale = PxScale::from(18.0);
    let prompt_line = format!("Prompt: {}", truncate_prompt(&spec.prompt));
    draw_text_mut(canvas, TEXT, 20, 20, scale, font, &prompt_line);
    draw_text_mut(
        canvas,
        NOTICE,
        20,
        50,
        scale,
        font,
        "Placeholder image - no model backend",
    );
    let (label_color, label_text) = match spec.label {
        RenderLabel::Character => (CHARACTER_LABEL, "Character generation mode"),
        RenderLabel::Scene => (SCENE_LABEL, "Scene generation mode"),
    };
    draw_text_mut(canvas, label_color, 20, 80, scale, font, label_text);
}

fn paste_reference(canvas: &mut RgbImage, reference: &Path) {
    let (width, _) = canvas.dimensions();
    if width < REF_SIZE + 21 {
        return;
    }

    let thumb = match image::open(reference) {
        Ok(img) => img.thumbnail(REF_SIZE, REF_SIZE).to_rgb8(),
        Err(err) => {
            tracing::warn!(
                reference = %reference.display(),
                error = %err,
                "could not add reference thumbnail"
            );
            return;
        }
    };

    let x = (width - REF_SIZE - 10) as i64;
    imageops::overlay(canvas, &thumb, x, 10);
    draw_hollow_rect_mut(
        canvas,
        Rect::at((width - REF_SIZE - 11) as i32, 9).of_size(REF_SIZE + 2, REF_SIZE + 2),
        FRAME,
    );
}

fn truncate_prompt(prompt: &str) -> String {
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        let head: String = prompt.chars().take(MAX_PROMPT_CHARS - 3).collect();
        format!("{head}...")
    } else {
        prompt.to_string()
    }
}
