//! Scene repository. Append-only: scenes are created and listed, never
//! updated or deleted.

use crate::error::StoreResult;
use crate::index::JsonIndex;
use atelier_core::{AssetId, SceneAsset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tokio::sync::Mutex;

/// Index file name under the scene artifact root.
const INDEX_FILE: &str = "scenes.json";

/// Persisted scene metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneRecord {
    pub id: AssetId,
    /// Foreign reference to a character; not an ownership relation — this
    /// store never mutates or deletes the referenced character.
    pub character_id: AssetId,
    pub plot_description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl SceneRecord {
    /// Fresh record for a just-generated scene.
    pub fn new(id: AssetId, character_id: AssetId, plot_description: String) -> Self {
        Self {
            id,
            character_id,
            plot_description,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// The API view of this record.
    pub fn to_asset(&self) -> SceneAsset {
        SceneAsset::new(
            self.id,
            self.character_id,
            self.plot_description.clone(),
            self.created_at,
        )
    }
}

/// Durable scene metadata store with filesystem-backed artifacts.
pub struct SceneStore {
    root: PathBuf,
    index: Mutex<JsonIndex<SceneRecord>>,
}

impl SceneStore {
    /// Open the store rooted at `root`, creating the directory and loading
    /// the index.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        let index = JsonIndex::load(root.join(INDEX_FILE)).await;
        Ok(Self {
            root,
            index: Mutex::new(index),
        })
    }

    /// The artifact root for this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk path of the primary artifact for `id`.
    pub fn primary_path(&self, id: AssetId) -> PathBuf {
        self.root.join(id.primary_artifact())
    }

    /// All scenes. Order is unspecified.
    pub async fn list(&self) -> Vec<SceneAsset> {
        let index = self.index.lock().await;
        index.entries.values().map(SceneRecord::to_asset).collect()
    }

    /// Commit a freshly generated scene's metadata.
    pub async fn insert(&self, record: SceneRecord) -> StoreResult<SceneAsset> {
        let mut index = self.index.lock().await;
        let asset = record.to_asset();
        index.entries.insert(record.id, record);
        index.save().await?;
        Ok(asset)
    }
}
