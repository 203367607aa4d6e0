//! File-backed metadata repositories for Atelier.
//!
//! Each store owns one JSON index file (loaded fully at startup, rewritten
//! atomically on every mutation) plus the artifact files named after asset
//! ids under the store's root:
//! - Character store: `{id}.png`, `{id}_reference.png`, `characters.json`
//! - Scene store: `{id}.png`, `scenes.json`

pub mod character;
pub mod error;
mod index;
pub mod scene;

pub use character::{CharacterRecord, CharacterStore};
pub use error::{StoreError, StoreResult};
pub use scene::{SceneRecord, SceneStore};
