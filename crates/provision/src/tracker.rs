//! The capability tracker: status board plus supervised provisioning runs.

use crate::capability::{Capability, CapabilityGroup, InstallAction};
use crate::status::{CapabilityState, StatusReport};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

/// What a provisioning trigger covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallScope {
    All,
    Dependencies,
    Models,
}

impl InstallScope {
    fn groups(self) -> &'static [CapabilityGroup] {
        match self {
            Self::All => &[CapabilityGroup::Dependencies, CapabilityGroup::Models],
            Self::Dependencies => &[CapabilityGroup::Dependencies],
            Self::Models => &[CapabilityGroup::Models],
        }
    }
}

/// Acknowledgment returned immediately by an install trigger.
#[derive(Clone, Debug, Serialize)]
pub struct InstallAck {
    pub accepted: bool,
    pub message: String,
}

/// Tracks installation state of the generation capability and its model
/// assets.
///
/// Provisioning runs are fire-and-forget: the trigger returns before work
/// completes and progress is observed by polling [`get_status`]. Each group
/// has at most one run in flight at a time; a re-trigger while a run is
/// active is acknowledged without spawning a duplicate. Run handles are kept
/// in a registry so finished (or panicked) runs are pruned on the next
/// trigger.
///
/// [`get_status`]: CapabilityTracker::get_status
pub struct CapabilityTracker {
    capabilities: Vec<Capability>,
    states: RwLock<BTreeMap<String, CapabilityState>>,
    runs: Mutex<HashMap<CapabilityGroup, JoinHandle<()>>>,
    step_delay: Duration,
}

impl CapabilityTracker {
    pub fn new(capabilities: Vec<Capability>, step_delay: Duration) -> Self {
        let states = capabilities
            .iter()
            .map(|cap| (cap.name.clone(), CapabilityState::not_installed()))
            .collect();
        Self {
            capabilities,
            states: RwLock::new(states),
            runs: Mutex::new(HashMap::new()),
            step_delay,
        }
    }

    /// Re-probe every capability and return a consistent snapshot.
    ///
    /// A succeeding probe marks its record installed; a failing probe
    /// downgrades a previously-installed record but leaves in-flight
    /// provisioning progress untouched.
    pub async fn get_status(&self) -> StatusReport {
        let mut probed = Vec::with_capacity(self.capabilities.len());
        for capability in &self.capabilities {
            probed.push((
                capability.name.clone(),
                capability.group,
                capability.probe.probe().await,
            ));
        }

        let mut states = self.states.write().await;
        for (name, _, present) in &probed {
            if let Some(record) = states.get_mut(name) {
                if *present {
                    *record = CapabilityState::installed();
                } else if record.installed {
                    *record = CapabilityState::not_installed();
                }
            }
        }

        let mut dependencies = BTreeMap::new();
        let mut models = BTreeMap::new();
        for (name, group, _) in probed {
            if let Some(record) = states.get(&name) {
                match group {
                    CapabilityGroup::Dependencies => dependencies.insert(name, record.clone()),
                    CapabilityGroup::Models => models.insert(name, record.clone()),
                };
            }
        }
        StatusReport::new(dependencies, models)
    }

    /// Begin provisioning for the scope without blocking the caller.
    pub async fn install(self: &Arc<Self>, scope: InstallScope) -> InstallAck {
        let mut runs = self.runs.lock().await;
        runs.retain(|_, handle| !handle.is_finished());

        let mut started = 0;
        for &group in scope.groups() {
            if runs.contains_key(&group) {
                tracing::info!(?group, "provisioning already in flight, not re-spawning");
                continue;
            }
            let tracker = Arc::clone(self);
            let handle = tokio::spawn(async move {
                tracker.run_group(group).await;
            });
            runs.insert(group, handle);
            started += 1;
        }

        let message = if started == 0 {
            "Installation already in progress"
        } else {
            "Installation started"
        };
        InstallAck {
            accepted: true,
            message: message.to_string(),
        }
    }

    /// One provisioning run over a group. A failure on one capability is
    /// recorded in its message and does not abort the siblings.
    async fn run_group(&self, group: CapabilityGroup) {
        let members: Vec<Capability> = self
            .capabilities
            .iter()
            .filter(|cap| cap.group == group)
            .cloned()
            .collect();

        for capability in &members {
            if !capability.probe.probe().await {
                self.set_state(
                    &capability.name,
                    CapabilityState::in_progress(10, group.start_message()),
                )
                .await;
            }
        }

        for capability in members {
            if capability.probe.probe().await {
                self.set_state(&capability.name, CapabilityState::installed())
                    .await;
                continue;
            }

            for (progress, message) in &capability.milestones {
                self.set_state(
                    &capability.name,
                    CapabilityState::in_progress(*progress, message.clone()),
                )
                .await;
                tokio::time::sleep(self.step_delay).await;
            }

            match self.perform(&capability).await {
                Ok(()) => {
                    self.set_state(&capability.name, CapabilityState::installed())
                        .await;
                    tracing::info!(capability = %capability.name, "capability provisioned");
                }
                Err(err) => {
                    tracing::error!(
                        capability = %capability.name,
                        error = %err,
                        "provisioning failed"
                    );
                    let mut states = self.states.write().await;
                    if let Some(record) = states.get_mut(&capability.name) {
                        record.installed = false;
                        record.message = format!("{}: {err}", group.failure_prefix());
                    }
                }
            }
        }
    }

    async fn perform(&self, capability: &Capability) -> std::io::Result<()> {
        match &capability.action {
            InstallAction::None => Ok(()),
            InstallAction::MaterializeDir(dir) => {
                tokio::fs::create_dir_all(dir).await?;
                if capability.group == CapabilityGroup::Models {
                    tokio::fs::write(dir.join("model.safetensors"), b"").await?;
                }
                Ok(())
            }
        }
    }

    async fn set_state(&self, name: &str, state: CapabilityState) {
        let mut states = self.states.write().await;
        if let Some(record) = states.get_mut(name) {
            *record = state;
        }
    }
}
