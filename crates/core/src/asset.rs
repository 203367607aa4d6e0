//! Asset identity and the API-facing asset views.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// URL prefix under which character artifacts are served.
pub const CHARACTER_URL_PREFIX: &str = "/uploads/characters";

/// URL prefix under which scene artifacts are served.
pub const SCENE_URL_PREFIX: &str = "/uploads/scenes";

/// Opaque unique identifier for a generated asset.
///
/// The id doubles as the base filename for the asset's on-disk artifacts,
/// so it must stay path-safe. Backed by a v4 UUID; allocated once at
/// creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(Uuid);

impl AssetId {
    /// Allocate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Filename of the primary artifact for this asset.
    pub fn primary_artifact(&self) -> String {
        format!("{}.png", self.0)
    }

    /// Filename of the reference artifact for this asset.
    pub fn reference_artifact(&self) -> String {
        format!("{}_reference.png", self.0)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AssetId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| crate::Error::InvalidAssetId(s.to_string()))
    }
}

/// A generated character as returned by the API.
///
/// `image_url` and `references` are derived from the id; they are computed
/// at view-construction time and never persisted, so they cannot
/// desynchronize from the actual artifact paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterAsset {
    pub id: AssetId,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub image_url: String,
    pub references: Vec<String>,
}

impl CharacterAsset {
    /// Build the view for a character, deriving artifact URLs from the id.
    pub fn new(
        id: AssetId,
        description: String,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
        has_reference: bool,
    ) -> Self {
        let references = if has_reference {
            vec![format!(
                "{CHARACTER_URL_PREFIX}/{}",
                id.reference_artifact()
            )]
        } else {
            Vec::new()
        };
        Self {
            id,
            description,
            created_at,
            updated_at,
            image_url: format!("{CHARACTER_URL_PREFIX}/{}", id.primary_artifact()),
            references,
        }
    }
}

/// A generated scene as returned by the API. Append-only: scenes are never
/// updated or deleted once committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAsset {
    pub id: AssetId,
    pub character_id: AssetId,
    pub plot_description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub image_url: String,
}

impl SceneAsset {
    /// Build the view for a scene, deriving the artifact URL from the id.
    pub fn new(
        id: AssetId,
        character_id: AssetId,
        plot_description: String,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            character_id,
            plot_description,
            created_at,
            image_url: format!("{SCENE_URL_PREFIX}/{}", id.primary_artifact()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let ids: Vec<AssetId> = (0..64).map(|_| AssetId::generate()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn asset_id_roundtrips_through_display() {
        let id = AssetId::generate();
        let parsed: AssetId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn asset_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<AssetId>().is_err());
        assert!("../escape".parse::<AssetId>().is_err());
    }

    #[test]
    fn character_view_derives_urls_from_id() {
        let id = AssetId::generate();
        let now = OffsetDateTime::now_utc();
        let asset = CharacterAsset::new(id, "a knight".to_string(), now, now, true);
        assert_eq!(asset.image_url, format!("/uploads/characters/{id}.png"));
        assert_eq!(
            asset.references,
            vec![format!("/uploads/characters/{id}_reference.png")]
        );

        let plain = CharacterAsset::new(id, "a knight".to_string(), now, now, false);
        assert!(plain.references.is_empty());
    }

    #[test]
    fn scene_view_derives_url_from_id() {
        let id = AssetId::generate();
        let asset = SceneAsset::new(
            id,
            AssetId::generate(),
            "storms a castle".to_string(),
            OffsetDateTime::now_utc(),
        );
        assert_eq!(asset.image_url, format!("/uploads/scenes/{id}.png"));
    }
}
