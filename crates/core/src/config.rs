//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub provision: ProvisionConfig,
}

impl AppConfig {
    /// Create a test configuration rooted at a scratch directory.
    ///
    /// **For testing only.** Placeholder mode, zero provisioning delay.
    pub fn for_testing(root: impl AsRef<Path>) -> Self {
        Self {
            data: DataConfig {
                root: root.as_ref().to_path_buf(),
            },
            synthesis: SynthesisConfig {
                mode: GenerationMode::Placeholder,
                ..SynthesisConfig::default()
            },
            provision: ProvisionConfig { step_delay_ms: 0 },
            ..Self::default()
        }
    }
}

/// HTTP server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// On-disk data layout configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    /// Root directory for artifacts, indexes, models, and upload scratch.
    #[serde(default = "default_data_root")]
    pub root: PathBuf,
}

impl DataConfig {
    /// Character artifact root (primary and reference images plus the index).
    pub fn characters_dir(&self) -> PathBuf {
        self.root.join("uploads").join("characters")
    }

    /// Scene artifact root.
    pub fn scenes_dir(&self) -> PathBuf {
        self.root.join("uploads").join("scenes")
    }

    /// Scratch directory for multipart uploads.
    pub fn temp_dir(&self) -> PathBuf {
        self.root.join("uploads").join("temp")
    }

    /// Directory where provisioned model assets are materialized.
    pub fn models_dir(&self) -> PathBuf {
        self.root.join("models")
    }

    /// Directory where provisioned runtime components are materialized.
    pub fn runtime_dir(&self) -> PathBuf {
        self.root.join("runtime")
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: default_data_root(),
        }
    }
}

/// Operating mode for the synthesis gateway, chosen at construction and
/// never changed mid-request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Deterministic local placeholder rendering.
    #[default]
    Placeholder,
    /// Remote full-fidelity synthesis, degrading to placeholder on failure.
    Full,
}

/// Synthesis gateway configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SynthesisConfig {
    #[serde(default)]
    pub mode: GenerationMode,
    /// Base URL of the full-fidelity synthesis API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bound on a single full-fidelity generation request. On expiry the
    /// gateway falls back to placeholder rendering.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl SynthesisConfig {
    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::default(),
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Capability provisioning configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProvisionConfig {
    /// Delay between provisioning milestones, in milliseconds. Tests set
    /// this to zero.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

impl ProvisionConfig {
    /// Get the milestone delay as a Duration.
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_api_url() -> String {
    "http://127.0.0.1:7860".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_step_delay_ms() -> u64 {
    500
}
