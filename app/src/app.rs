use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::services::export::ExportStore;
use crate::services::source::SourceImage;

/// Studio session state shared by the command line front end and services.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Application configuration
    config: RwLock<AppConfig>,
    /// Decoded source image, if one is loaded
    source: RwLock<Option<SourceImage>>,
    /// Latest requested render generation
    generation: AtomicU64,
    /// Latest exported render
    exports: ExportStore,
}

impl SharedState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config: RwLock::new(config),
                source: RwLock::new(None),
                generation: AtomicU64::new(0),
                exports: ExportStore::default(),
            }),
        }
    }

    /// Get a read lock on the current config.
    pub async fn config(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.config.read().await
    }

    /// Replace the current config.
    pub async fn set_config(&self, config: AppConfig) {
        *self.inner.config.write().await = config;
    }

    pub async fn source(&self) -> Option<SourceImage> {
        self.inner.source.read().await.clone()
    }

    /// Install a new source image. Renders still in flight for the previous
    /// source are invalidated.
    pub async fn set_source(&self, source: SourceImage) {
        *self.inner.source.write().await = Some(source);
        self.begin_render();
    }

    /// Claim a new render generation. Any render holding an older generation
    /// is stale from now on.
    pub fn begin_render(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest_generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest_generation() == generation
    }

    pub fn exports(&self) -> &ExportStore {
        &self.inner.exports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_increase_and_invalidate_older() {
        let state = SharedState::new(AppConfig::default());
        assert_eq!(state.latest_generation(), 0);

        let first = state.begin_render();
        assert!(state.is_current(first));

        let second = state.begin_render();
        assert!(second > first);
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[tokio::test]
    async fn test_config_can_be_replaced() {
        let state = SharedState::new(AppConfig::default());
        let mut config = AppConfig::default();
        config.grid_size = 42;
        state.set_config(config).await;
        assert_eq!(state.config().await.grid_size, 42);
    }
}
