//! Application state shared across handlers.

use crate::orchestrator::{CharacterOrchestrator, SceneOrchestrator};
use atelier_core::config::AppConfig;
use atelier_provision::{CapabilityTracker, default_capabilities};
use atelier_store::{CharacterStore, SceneStore};
use atelier_synthesis::SynthesisGateway;
use std::sync::Arc;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub characters: Arc<CharacterStore>,
    pub scenes: Arc<SceneStore>,
    pub gateway: Arc<SynthesisGateway>,
    pub tracker: Arc<CapabilityTracker>,
    pub character_gen: Arc<CharacterOrchestrator>,
    pub scene_gen: Arc<SceneOrchestrator>,
}

impl AppState {
    /// Build the full application state from configuration: ensure the data
    /// layout exists, open the stores, and wire up the gateway, tracker, and
    /// orchestrators.
    pub async fn initialize(config: AppConfig) -> anyhow::Result<Self> {
        crate::bootstrap::ensure_data_layout(&config).await?;

        let characters = Arc::new(CharacterStore::open(config.data.characters_dir()).await?);
        let scenes = Arc::new(SceneStore::open(config.data.scenes_dir()).await?);
        let gateway = Arc::new(SynthesisGateway::new(config.synthesis.clone()));
        let tracker = Arc::new(CapabilityTracker::new(
            default_capabilities(&config.data),
            config.provision.step_delay(),
        ));

        let character_gen = Arc::new(CharacterOrchestrator::new(
            Arc::clone(&characters),
            Arc::clone(&gateway),
        ));
        let scene_gen = Arc::new(SceneOrchestrator::new(
            Arc::clone(&characters),
            Arc::clone(&scenes),
            Arc::clone(&gateway),
        ));

        Ok(Self {
            config: Arc::new(config),
            characters,
            scenes,
            gateway,
            tracker,
            character_gen,
            scene_gen,
        })
    }
}
