//! Generation orchestrators.
//!
//! Each orchestrator composes prompt construction, the synthesis gateway,
//! and a repository into one end-to-end operation. The ordering invariant
//! is the same in both: the image artifact is written first, metadata is
//! committed only after synthesis succeeds, so the index never references
//! an artifact that does not exist.

mod character;
mod scene;

pub use character::CharacterOrchestrator;
pub use scene::SceneOrchestrator;
