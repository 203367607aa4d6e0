//! Capability readiness tracking and background provisioning for Atelier.
//!
//! This crate owns the answer to "can the full-fidelity synthesis backend
//! actually run here":
//! - Injectable probes for capability readiness checks
//! - Per-capability and aggregate status reporting
//! - Supervised, idempotent, fire-and-forget provisioning runs

pub mod capability;
pub mod probe;
pub mod status;
pub mod tracker;

pub use capability::{Capability, CapabilityGroup, InstallAction, default_capabilities};
pub use probe::{CapabilityProbe, DirectoryProbe, EndpointProbe, FixedProbe};
pub use status::{CapabilityState, OverallStatus, StatusReport};
pub use tracker::{CapabilityTracker, InstallAck, InstallScope};
