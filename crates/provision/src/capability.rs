//! Capability definitions and the default capability set.

use crate::probe::{CapabilityProbe, DirectoryProbe};
use atelier_core::config::DataConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Which provisioning group a capability belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityGroup {
    Dependencies,
    Models,
}

impl CapabilityGroup {
    /// Message set on every record in the group when a run begins.
    pub fn start_message(&self) -> &'static str {
        match self {
            Self::Dependencies => "Installation started",
            Self::Models => "Download started",
        }
    }

    /// Prefix for failure messages in this group.
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Self::Dependencies => "Installation failed",
            Self::Models => "Download failed",
        }
    }
}

/// What a provisioning run materializes for a capability.
#[derive(Clone, Debug)]
pub enum InstallAction {
    /// Nothing on disk; the capability is ready once its milestones ran.
    None,
    /// Create the directory and drop a weight-file marker into it.
    MaterializeDir(PathBuf),
}

/// A tracked capability: identity, readiness probe, and provisioning plan.
#[derive(Clone)]
pub struct Capability {
    pub name: String,
    pub group: CapabilityGroup,
    pub probe: Arc<dyn CapabilityProbe>,
    /// Progress milestones (percent, message) stepped through by a run.
    pub milestones: Vec<(u8, String)>,
    pub action: InstallAction,
}

impl Capability {
    pub fn new(
        name: impl Into<String>,
        group: CapabilityGroup,
        probe: Arc<dyn CapabilityProbe>,
    ) -> Self {
        Self {
            name: name.into(),
            group,
            probe,
            milestones: Vec::new(),
            action: InstallAction::None,
        }
    }

    pub fn with_milestones(mut self, milestones: Vec<(u8, &str)>) -> Self {
        self.milestones = milestones
            .into_iter()
            .map(|(progress, message)| (progress, message.to_string()))
            .collect();
        self
    }

    pub fn with_action(mut self, action: InstallAction) -> Self {
        self.action = action;
        self
    }
}

/// The default capability set: three runtime components and three model
/// assets, all directory-probed so that probing, provisioning, and status
/// stay mutually consistent.
pub fn default_capabilities(data: &DataConfig) -> Vec<Capability> {
    let runtime = data.runtime_dir();
    let models = data.models_dir();

    let component = |name: &str, milestones: Vec<(u8, &str)>| {
        let dir = runtime.join(name);
        Capability::new(
            name,
            CapabilityGroup::Dependencies,
            Arc::new(DirectoryProbe::new(&dir)),
        )
        .with_milestones(milestones)
        .with_action(InstallAction::MaterializeDir(dir))
    };
    let model = |name: &str| {
        let dir = models.join(name);
        Capability::new(
            name,
            CapabilityGroup::Models,
            Arc::new(DirectoryProbe::new(&dir)),
        )
        .with_milestones(vec![(30, "Downloading model files")])
        .with_action(InstallAction::MaterializeDir(dir))
    };

    vec![
        component(
            "stable_diffusion",
            vec![
                (33, "Installing torch"),
                (55, "Installing diffusers"),
                (78, "Installing transformers"),
                (100, "Installing accelerate"),
            ],
        ),
        component("control_net", vec![(50, "Installing")]),
        component("face_id", vec![(50, "Installing")]),
        model("anime_model"),
        model("real_dream_pony"),
        model("controlnet_openpose"),
    ]
}
