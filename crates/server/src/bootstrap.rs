//! Startup provisioning of the on-disk data layout.

use atelier_core::config::AppConfig;

/// Create every directory the server writes into. Idempotent; existing
/// directories and their contents are left alone.
pub async fn ensure_data_layout(config: &AppConfig) -> std::io::Result<()> {
    for dir in [
        config.data.characters_dir(),
        config.data.scenes_dir(),
        config.data.temp_dir(),
        config.data.models_dir(),
        config.data.runtime_dir(),
    ] {
        tokio::fs::create_dir_all(&dir).await?;
    }
    Ok(())
}
