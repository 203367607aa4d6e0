//! Prompt construction for synthesis requests.
//!
//! Callers supply free text; the orchestrators append a fixed style suffix
//! and always pair the positive prompt with the same negative guard.

/// Style suffix appended to every character prompt.
const CHARACTER_STYLE: &str =
    "anime character, full body, white background, high quality, detailed";

/// Style suffix appended to every scene prompt.
const SCENE_STYLE: &str = "anime style, high quality, detailed";

/// Fixed negative prompt guarding against common anatomical artifacts.
pub const NEGATIVE_PROMPT: &str = "bad anatomy, bad proportions, blurry, low quality";

/// Positive prompt for character generation.
pub fn character_prompt(description: &str) -> String {
    format!("{description}, {CHARACTER_STYLE}")
}

/// Positive prompt for scene generation, interpolating the referenced
/// character's stored description with the caller's plot text.
pub fn scene_prompt(character_description: &str, plot: &str) -> String {
    format!("{character_description} in {plot}, {SCENE_STYLE}")
}
