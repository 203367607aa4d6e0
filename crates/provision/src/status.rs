//! Capability status records and the derived aggregate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Installation state of a single capability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityState {
    pub installed: bool,
    /// 0..=100.
    pub progress: u8,
    pub message: String,
}

impl CapabilityState {
    pub fn not_installed() -> Self {
        Self {
            installed: false,
            progress: 0,
            message: "Not installed".to_string(),
        }
    }

    pub fn installed() -> Self {
        Self {
            installed: true,
            progress: 100,
            message: "Installed".to_string(),
        }
    }

    pub fn in_progress(progress: u8, message: impl Into<String>) -> Self {
        Self {
            installed: false,
            progress,
            message: message.into(),
        }
    }
}

/// Aggregate readiness derived from all capability records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallStatus {
    pub ready: bool,
    pub progress: u8,
    pub message: String,
}

/// Full status snapshot: per-capability records plus the aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub dependencies: BTreeMap<String, CapabilityState>,
    pub models: BTreeMap<String, CapabilityState>,
    pub overall_status: OverallStatus,
}

impl StatusReport {
    /// Build a report, deriving the aggregate from the individual records.
    pub fn new(
        dependencies: BTreeMap<String, CapabilityState>,
        models: BTreeMap<String, CapabilityState>,
    ) -> Self {
        let overall_status = aggregate(dependencies.values().chain(models.values()));
        Self {
            dependencies,
            models,
            overall_status,
        }
    }
}

/// Mean progress across all records; ready iff every record is installed.
pub fn aggregate<'a>(records: impl Iterator<Item = &'a CapabilityState>) -> OverallStatus {
    let mut total = 0u32;
    let mut count = 0u32;
    let mut installed = 0u32;

    for record in records {
        total += u32::from(record.progress);
        count += 1;
        if record.installed {
            installed += 1;
        }
    }

    let progress = if count == 0 {
        0
    } else {
        ((f64::from(total) / f64::from(count)).round()) as u8
    };

    let ready = count > 0 && installed == count;
    let message = if ready {
        "Ready to use"
    } else if progress > 0 {
        "Installation in progress"
    } else {
        "Installation required"
    };

    OverallStatus {
        ready,
        progress,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(states: &[(&str, CapabilityState)]) -> StatusReport {
        let mut deps = BTreeMap::new();
        for (name, state) in states {
            deps.insert(name.to_string(), state.clone());
        }
        StatusReport::new(deps, BTreeMap::new())
    }

    #[test]
    fn ready_iff_every_record_installed() {
        let all_in = report_with(&[
            ("a", CapabilityState::installed()),
            ("b", CapabilityState::installed()),
        ]);
        assert!(all_in.overall_status.ready);
        assert_eq!(all_in.overall_status.message, "Ready to use");

        // Flipping any one record false flips aggregate ready false.
        let one_out = report_with(&[
            ("a", CapabilityState::installed()),
            ("b", CapabilityState::not_installed()),
        ]);
        assert!(!one_out.overall_status.ready);
    }

    #[test]
    fn progress_is_the_rounded_mean() {
        let report = report_with(&[
            ("a", CapabilityState::installed()),
            ("b", CapabilityState::in_progress(30, "Downloading")),
            ("c", CapabilityState::not_installed()),
        ]);
        assert_eq!(report.overall_status.progress, 43);
        assert_eq!(report.overall_status.message, "Installation in progress");
    }

    #[test]
    fn untouched_board_reports_installation_required() {
        let report = report_with(&[
            ("a", CapabilityState::not_installed()),
            ("b", CapabilityState::not_installed()),
        ]);
        assert_eq!(report.overall_status.progress, 0);
        assert_eq!(report.overall_status.message, "Installation required");
        assert!(!report.overall_status.ready);
    }

    #[test]
    fn report_serializes_with_stable_field_names() {
        let report = report_with(&[("stable_diffusion", CapabilityState::not_installed())]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["dependencies"]["stable_diffusion"]["installed"],
            serde_json::json!(false)
        );
        assert!(json["overall_status"]["ready"].is_boolean());
    }
}
