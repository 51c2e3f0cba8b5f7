//! Exported renders behind transient handles.
//!
//! Only the most recent export is kept. Publishing a new one revokes the
//! previous handle, the same way a browser UI revokes an object URL when the
//! next render replaces it.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::StudioError;

/// A PNG-encoded full-resolution render.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedImage {
    pub id: String,
    pub file_name: String,
    pub generation: u64,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub png: Arc<[u8]>,
}

impl ExportedImage {
    pub fn byte_len(&self) -> usize {
        self.png.len()
    }

    /// Inline `data:` URL of the PNG.
    pub fn data_url(&self) -> String {
        dot_pattern::png_data_url(&self.png)
    }

    /// Write the PNG to `path`.
    pub async fn write_to(&self, path: &Path) -> Result<(), StudioError> {
        tokio::fs::write(path, &self.png).await?;
        tracing::info!(id = %self.id, path = %path.display(), bytes = self.png.len(), "Export written");
        Ok(())
    }
}

/// Holds the latest export.
#[derive(Clone, Default)]
pub struct ExportStore {
    current: Arc<RwLock<Option<ExportedImage>>>,
}

impl ExportStore {
    /// Publish the result of render `generation`, revoking the previous export.
    ///
    /// A result older than the one already published is rejected.
    pub async fn publish(
        &self,
        generation: u64,
        file_name: &str,
        png: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<ExportedImage, StudioError> {
        let mut slot = self.current.write().await;
        if let Some(existing) = slot.as_ref() {
            if existing.generation > generation {
                return Err(StudioError::Superseded {
                    generation,
                    latest: existing.generation,
                });
            }
        }

        let export = ExportedImage {
            id: nanoid::nanoid!(),
            file_name: file_name.to_string(),
            generation,
            width,
            height,
            png: png.into(),
        };

        if let Some(old) = slot.replace(export.clone()) {
            tracing::debug!(id = %old.id, generation = old.generation, "Export handle revoked");
        }
        tracing::info!(id = %export.id, generation, width, height, "Export published");
        Ok(export)
    }

    /// Look up an export by handle. Revoked handles resolve to `None`.
    pub async fn get(&self, id: &str) -> Option<ExportedImage> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|e| e.id == id)
            .cloned()
    }

    pub async fn latest(&self) -> Option<ExportedImage> {
        self.current.read().await.clone()
    }

    /// Drop the current export, revoking its handle.
    pub async fn revoke(&self) -> Option<ExportedImage> {
        self.current.write().await.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_replaces_and_revokes_previous_handle() {
        let store = ExportStore::default();
        let first = store.publish(1, "a.png", vec![1, 2, 3], 4, 4).await.unwrap();
        assert!(store.get(&first.id).await.is_some());

        let second = store.publish(2, "a.png", vec![4, 5], 4, 4).await.unwrap();
        assert_ne!(first.id, second.id);
        assert!(store.get(&first.id).await.is_none());
        assert_eq!(store.get(&second.id).await.unwrap().byte_len(), 2);
    }

    #[tokio::test]
    async fn test_older_generation_is_rejected() {
        let store = ExportStore::default();
        store.publish(5, "a.png", vec![0], 1, 1).await.unwrap();

        let stale = store.publish(3, "a.png", vec![0], 1, 1).await;
        assert!(matches!(
            stale,
            Err(StudioError::Superseded {
                generation: 3,
                latest: 5
            })
        ));
        assert_eq!(store.latest().await.unwrap().generation, 5);
    }

    #[tokio::test]
    async fn test_revoke_clears_latest() {
        let store = ExportStore::default();
        let export = store.publish(1, "a.png", vec![0], 1, 1).await.unwrap();
        assert_eq!(store.revoke().await.unwrap().id, export.id);
        assert!(store.latest().await.is_none());
        assert!(store.get(&export.id).await.is_none());
    }

    #[test]
    fn test_summary_serialization_skips_png_bytes() {
        let export = ExportedImage {
            id: "abc".into(),
            file_name: "processed-image.png".into(),
            generation: 1,
            width: 2,
            height: 3,
            png: Arc::from(vec![9u8; 10]),
        };
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["id"], "abc");
        assert!(json.get("png").is_none());
    }
}
