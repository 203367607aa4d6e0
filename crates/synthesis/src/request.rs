//! Synthesis request and result types.

/// Default character output dimensions (portrait).
pub const CHARACTER_WIDTH: u32 = 512;
pub const CHARACTER_HEIGHT: u32 = 768;

/// Default scene output dimensions (landscape).
pub const SCENE_WIDTH: u32 = 768;
pub const SCENE_HEIGHT: u32 = 512;

/// A single synthesis request as seen by the gateway.
#[derive(Clone, Debug)]
pub struct SynthesisRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
}

impl SynthesisRequest {
    /// Character-style request with portrait default dimensions.
    pub fn character(prompt: impl Into<String>, negative_prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: negative_prompt.into(),
            width: CHARACTER_WIDTH,
            height: CHARACTER_HEIGHT,
        }
    }

    /// Scene-style request with landscape default dimensions.
    pub fn scene(prompt: impl Into<String>, negative_prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: negative_prompt.into(),
            width: SCENE_WIDTH,
            height: SCENE_HEIGHT,
        }
    }

    /// Override the output dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Which path actually produced the artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    /// The full-fidelity backend rendered the image.
    Real,
    /// The deterministic placeholder renderer produced it.
    Placeholder,
}

/// Result of a successful gateway call.
#[derive(Clone, Copy, Debug)]
pub struct SynthesisOutput {
    pub provenance: Provenance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_defaults_are_portrait() {
        let req = SynthesisRequest::character("p", "n");
        assert_eq!((req.width, req.height), (512, 768));
    }

    #[test]
    fn scene_defaults_are_landscape() {
        let req = SynthesisRequest::scene("p", "n");
        assert_eq!((req.width, req.height), (768, 512));
    }

    #[test]
    fn dimensions_can_be_overridden() {
        let req = SynthesisRequest::character("p", "n").with_dimensions(64, 64);
        assert_eq!((req.width, req.height), (64, 64));
    }
}
