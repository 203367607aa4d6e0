//! Character repository.

use crate::error::StoreResult;
use crate::index::JsonIndex;
use atelier_core::{AssetId, CharacterAsset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tokio::sync::Mutex;

/// Index file name under the character artifact root.
const INDEX_FILE: &str = "characters.json";

/// Persisted character metadata.
///
/// Artifact URLs are not stored; they are derived from the id when the
/// record is turned into its API view, so they can never desynchronize
/// from the artifact naming scheme.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: AssetId,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default)]
    pub has_reference: bool,
}

impl CharacterRecord {
    /// Fresh record for a just-generated character.
    pub fn new(id: AssetId, description: String, has_reference: bool) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id,
            description,
            created_at: now,
            updated_at: now,
            has_reference,
        }
    }

    /// The API view of this record.
    pub fn to_asset(&self) -> CharacterAsset {
        CharacterAsset::new(
            self.id,
            self.description.clone(),
            self.created_at,
            self.updated_at,
            self.has_reference,
        )
    }
}

/// Durable character metadata store with filesystem-backed artifacts.
///
/// All read-modify-write sequences on the index (in memory and on disk) run
/// under one mutex, so concurrent creates and deletes cannot lose updates.
pub struct CharacterStore {
    root: PathBuf,
    index: Mutex<JsonIndex<CharacterRecord>>,
}

impl CharacterStore {
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

    /// On-disk path of the reference artifact for `id`.
    pub fn reference_path(&self, id: AssetId) -> PathBuf {
        self.root.join(id.reference_artifact())
    }

    /// All characters. Order is unspecified.
    pub async fn list(&self) -> Vec<CharacterAsset> {
        let index = self.index.lock().await;
        index.entries.values().map(CharacterRecord::to_asset).collect()
    }

    /// Look up one character.
    pub async fn get(&self, id: AssetId) -> Option<CharacterAsset> {
        let index = self.index.lock().await;
        index.entries.get(&id).map(CharacterRecord::to_asset)
    }

    /// Commit a freshly generated character's metadata.
    pub async fn insert(&self, record: CharacterRecord) -> StoreResult<CharacterAsset> {
        let mut index = self.index.lock().await;
        let asset = record.to_asset();
        index.entries.insert(record.id, record);
        index.save().await?;
        Ok(asset)
    }

    /// Partial update: only supplied fields change; a supplied image
    /// replaces the primary artifact directly (no re-synthesis).
    /// `updated_at` refreshes on every successful call, even when no field
    /// actually changed. Returns `None` for an unknown id.
    pub async fn update(
        &self,
        id: AssetId,
        description: Option<String>,
        new_image: Option<&Path>,
    ) -> StoreResult<Option<CharacterAsset>> {
        let mut index = self.index.lock().await;
        if !index.entries.contains_key(&id) {
            return Ok(None);
        }

        if let Some(source) = new_image {
            tokio::fs::copy(source, self.primary_path(id)).await?;
        }

        let Some(record) = index.entries.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(description) = description {
            record.description = description;
        }
        record.updated_at = OffsetDateTime::now_utc();
        let asset = record.to_asset();

        index.save().await?;
        Ok(Some(asset))
    }

    /// Remove a character and its artifacts. Artifact cleanup is attempted
    /// first but is best-effort; metadata removal is authoritative. Returns
    /// false without side effects for an unknown id.
    pub async fn delete(&self, id: AssetId) -> StoreResult<bool> {
        let mut index = self.index.lock().await;
        if !index.entries.contains_key(&id) {
            return Ok(false);
        }

        for artifact in [self.primary_path(id), self.reference_path(id)] {
            if let Err(err) = tokio::fs::remove_file(&artifact).await {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        artifact = %artifact.display(),
                        error = %err,
                        "could not remove artifact, leaving orphan behind"
                    );
                }
            }
        }

        index.entries.remove(&id);
        index.save().await?;
        Ok(true)
    }

    /// Copy an uploaded reference image into place as `{id}_reference.png`.
    pub async fn persist_reference(&self, id: AssetId, source: &Path) -> StoreResult<()> {
        tokio::fs::copy(source, self.reference_path(id)).await?;
        Ok(())
    }
}
