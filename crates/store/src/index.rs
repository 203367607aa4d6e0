//! Shared JSON index machinery.

use crate::error::StoreResult;
use atelier_core::AssetId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// In-memory view of one store's index file.
///
/// The whole map is rewritten on every mutation; callers serialize access
/// through the owning store's mutex so two writers cannot interleave a
/// read-modify-write on the file.
pub(crate) struct JsonIndex<T> {
    path: PathBuf,
    pub(crate) entries: HashMap<AssetId, T>,
}

impl<T: Serialize + DeserializeOwned> JsonIndex<T> {
    /// Load the index, treating a missing or corrupt file as empty. A
    /// corrupt index is logged, not fatal: the store starts fresh and the
    /// damaged data is overwritten on the next mutation.
    pub(crate) async fn load(path: PathBuf) -> Self {
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::error!(
                        index = %path.display(),
                        error = %err,
                        "metadata index is corrupt, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                tracing::error!(
                    index = %path.display(),
                    error = %err,
                    "metadata index is unreadable, starting empty"
                );
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// Rewrite the index atomically: serialize to a sibling temp file, then
    /// rename over the index path.
    pub(crate) async fn save(&self) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(&self.entries)?;

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "index".to_string());
        let tmp = self
            .path
            .with_file_name(format!("{file_name}.tmp-{}", Uuid::new_v4()));

        tokio::fs::write(&tmp, &json).await?;
        if let Err(err) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        Ok(())
    }
}
