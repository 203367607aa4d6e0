//! Core domain types and shared logic for the Atelier generation backend.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Asset identifiers and artifact naming
//! - Character and scene asset views returned by the API
//! - Prompt construction for synthesis requests
//! - Configuration types

pub mod asset;
pub mod config;
pub mod error;
pub mod prompt;

pub use asset::{AssetId, CharacterAsset, SceneAsset};
pub use config::{
    AppConfig, DataConfig, GenerationMode, ProvisionConfig, ServerConfig, SynthesisConfig,
};
pub use error::{Error, Result};
