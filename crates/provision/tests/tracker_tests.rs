//! Integration tests for the capability tracker.

use atelier_provision::{
    Capability, CapabilityGroup, CapabilityTracker, FixedProbe, InstallAction, InstallScope,
    default_capabilities,
};
use atelier_core::config::DataConfig;
use std::sync::Arc;
use std::time::Duration;

fn tracker_for(root: &std::path::Path, step_delay: Duration) -> Arc<CapabilityTracker> {
    let data = DataConfig {
        root: root.to_path_buf(),
    };
    Arc::new(CapabilityTracker::new(
        default_capabilities(&data),
        step_delay,
    ))
}

async fn wait_until_ready(tracker: &CapabilityTracker) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if tracker.get_status().await.overall_status.ready {
            return;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("provisioning did not finish in time");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn fresh_tracker_reports_installation_required() {
    let temp = tempfile::tempdir().unwrap();
    let tracker = tracker_for(temp.path(), Duration::ZERO);

    let status = tracker.get_status().await;
    assert!(!status.overall_status.ready);
    assert_eq!(status.overall_status.progress, 0);
    assert_eq!(status.overall_status.message, "Installation required");
    assert_eq!(status.dependencies.len(), 3);
    assert_eq!(status.models.len(), 3);
}

#[tokio::test]
async fn install_all_reaches_ready_and_materializes_models() {
    let temp = tempfile::tempdir().unwrap();
    let tracker = tracker_for(temp.path(), Duration::ZERO);

    let ack = tracker.install(InstallScope::All).await;
    assert!(ack.accepted);
    assert_eq!(ack.message, "Installation started");

    wait_until_ready(&tracker).await;

    let status = tracker.get_status().await;
    assert!(status.overall_status.ready);
    assert_eq!(status.overall_status.progress, 100);
    for record in status.dependencies.values().chain(status.models.values()) {
        assert!(record.installed);
        assert_eq!(record.message, "Installed");
    }

    // Model assets were materialized with their weight marker.
    let marker = temp
        .path()
        .join("models")
        .join("real_dream_pony")
        .join("model.safetensors");
    assert!(marker.exists());
}

#[tokio::test]
async fn install_scope_models_leaves_dependencies_untouched() {
    let temp = tempfile::tempdir().unwrap();
    let tracker = tracker_for(temp.path(), Duration::ZERO);

    tracker.install(InstallScope::Models).await;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let status = tracker.get_status().await;
        if status.models.values().all(|m| m.installed) {
            assert!(status.dependencies.values().all(|d| !d.installed));
            assert!(!status.overall_status.ready);
            break;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("model provisioning did not finish in time");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn retrigger_while_in_flight_is_acknowledged_without_duplicate() {
    let temp = tempfile::tempdir().unwrap();
    let tracker = tracker_for(temp.path(), Duration::from_millis(200));

    let first = tracker.install(InstallScope::All).await;
    assert_eq!(first.message, "Installation started");

    let second = tracker.install(InstallScope::All).await;
    assert!(second.accepted);
    assert_eq!(second.message, "Installation already in progress");

    wait_until_ready(&tracker).await;

    // Once the run finished, a new trigger may start again.
    let third = tracker.install(InstallScope::All).await;
    assert_eq!(third.message, "Installation started");
}

#[tokio::test]
async fn polling_observes_intermediate_progress() {
    let temp = tempfile::tempdir().unwrap();
    let tracker = tracker_for(temp.path(), Duration::from_millis(50));

    tracker.install(InstallScope::Dependencies).await;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    let mut saw_partial = false;
    loop {
        let status = tracker.get_status().await;
        let progress = status.overall_status.progress;
        if progress > 0 && progress < 50 {
            saw_partial = true;
        }
        if status.dependencies.values().all(|d| d.installed) {
            break;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("dependency provisioning did not finish in time");
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(saw_partial, "no intermediate progress was observable");
}

#[tokio::test]
async fn one_failing_capability_does_not_abort_siblings() {
    let temp = tempfile::tempdir().unwrap();

    // Materializing under a plain file fails with ENOTDIR.
    let blocked = temp.path().join("blocked");
    tokio::fs::write(&blocked, b"").await.unwrap();
    let good_dir = temp.path().join("good");

    let capabilities = vec![
        Capability::new(
            "broken",
            CapabilityGroup::Models,
            Arc::new(FixedProbe(false)),
        )
        .with_milestones(vec![(30, "Downloading model files")])
        .with_action(InstallAction::MaterializeDir(blocked.join("nested"))),
        Capability::new("good", CapabilityGroup::Models, Arc::new(FixedProbe(false)))
            .with_milestones(vec![(30, "Downloading model files")])
            .with_action(InstallAction::MaterializeDir(good_dir.clone())),
    ];
    let tracker = Arc::new(CapabilityTracker::new(capabilities, Duration::ZERO));

    tracker.install(InstallScope::Models).await;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if good_dir.exists() {
            break;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("sibling capability was not provisioned");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let status = tracker.get_status().await;
    let broken = &status.models["broken"];
    assert!(!broken.installed);
    assert!(broken.message.starts_with("Download failed:"));
    assert!(!status.overall_status.ready);
}

#[tokio::test]
async fn probe_downgrade_flips_ready_off() {
    let temp = tempfile::tempdir().unwrap();
    let tracker = tracker_for(temp.path(), Duration::ZERO);

    tracker.install(InstallScope::All).await;
    wait_until_ready(&tracker).await;

    // Removing a model directory makes its probe fail again.
    tokio::fs::remove_dir_all(temp.path().join("models").join("anime_model"))
        .await
        .unwrap();

    let status = tracker.get_status().await;
    assert!(!status.models["anime_model"].installed);
    assert!(!status.overall_status.ready);
}
