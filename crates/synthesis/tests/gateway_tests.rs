//! Integration tests for the synthesis gateway's degrade-never-fail contract.

use atelier_core::config::{GenerationMode, SynthesisConfig};
use atelier_synthesis::{Provenance, SynthesisGateway, SynthesisRequest};
use std::path::Path;

/// Config pointing at a backend that cannot exist.
fn unreachable_full_mode() -> SynthesisConfig {
    SynthesisConfig {
        mode: GenerationMode::Full,
        api_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 2,
    }
}

fn assert_png_dimensions(path: &Path, width: u32, height: u32) {
    let decoded = image::open(path).expect("output artifact must be a readable image");
    assert_eq!((decoded.width(), decoded.height()), (width, height));
}

#[tokio::test]
async fn placeholder_mode_always_produces_an_artifact() {
    let temp = tempfile::tempdir().unwrap();
    let gateway = SynthesisGateway::new(SynthesisConfig::default());

    let output = temp.path().join("character.png");
    let result = gateway
        .generate_from_text(&SynthesisRequest::character("a knight", "blurry"), &output)
        .await
        .unwrap();

    assert_eq!(result.provenance, Provenance::Placeholder);
    assert_png_dimensions(&output, 512, 768);
}

#[tokio::test]
async fn full_mode_degrades_to_placeholder_when_backend_is_down() {
    let temp = tempfile::tempdir().unwrap();
    let gateway = SynthesisGateway::new(unreachable_full_mode());

    let output = temp.path().join("character.png");
    let result = gateway
        .generate_from_text(&SynthesisRequest::character("a knight", "blurry"), &output)
        .await
        .unwrap();

    assert_eq!(result.provenance, Provenance::Placeholder);
    assert_png_dimensions(&output, 512, 768);
}

#[tokio::test]
async fn reference_call_degrades_and_embeds_thumbnail_region() {
    let temp = tempfile::tempdir().unwrap();

    // A real reference image on disk.
    let reference = temp.path().join("reference.png");
    image::RgbImage::from_pixel(64, 64, image::Rgb([10, 20, 30]))
        .save(&reference)
        .unwrap();

    let gateway = SynthesisGateway::new(unreachable_full_mode());
    let output = temp.path().join("character.png");
    let result = gateway
        .generate_from_reference(
            &SynthesisRequest::character("a knight", "blurry"),
            &reference,
            &output,
        )
        .await
        .unwrap();

    assert_eq!(result.provenance, Provenance::Placeholder);
    assert_png_dimensions(&output, 512, 768);

    // The reference thumbnail lands in the top-right corner region.
    let rendered = image::open(&output).unwrap().to_rgb8();
    assert_eq!(rendered.get_pixel(512 - 150 + 5, 15), &image::Rgb([10, 20, 30]));
}

#[tokio::test]
async fn scene_call_degrades_with_landscape_defaults() {
    let temp = tempfile::tempdir().unwrap();

    let character_image = temp.path().join("character.png");
    image::RgbImage::from_pixel(32, 32, image::Rgb([0, 0, 0]))
        .save(&character_image)
        .unwrap();

    let gateway = SynthesisGateway::new(unreachable_full_mode());
    let output = temp.path().join("scene.png");
    let result = gateway
        .generate_scene(
            &SynthesisRequest::scene("a knight in a storm", "blurry"),
            &character_image,
            &output,
        )
        .await
        .unwrap();

    assert_eq!(result.provenance, Provenance::Placeholder);
    assert_png_dimensions(&output, 768, 512);
}

#[tokio::test]
async fn dimension_overrides_are_honored_in_fallback() {
    let temp = tempfile::tempdir().unwrap();
    let gateway = SynthesisGateway::new(SynthesisConfig::default());

    let output = temp.path().join("small.png");
    gateway
        .generate_from_text(
            &SynthesisRequest::character("a knight", "blurry").with_dimensions(256, 256),
            &output,
        )
        .await
        .unwrap();

    assert_png_dimensions(&output, 256, 256);
}
