use std::collections::HashMap;
use std::sync::Arc;

use super::{ComicVineAdapter, JikanAdapter, KitsuAdapter, MangaDexAdapter, MyAnimeListAdapter};
use crate::modules::provider::domain::MangaSource;
use crate::modules::provider::traits::MangaSourceAdapter;
use crate::shared::config::CatalogConfig;
use crate::shared::errors::AppResult;

/// Maps each source to the adapter serving it
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<MangaSource, Arc<dyn MangaSourceAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the five production adapters from configuration
    pub fn from_config(config: &CatalogConfig) -> AppResult<Self> {
        let registry = Self::new()
            .with(Arc::new(MangaDexAdapter::new(config)?))
            .with(Arc::new(MyAnimeListAdapter::new(config)?))
            .with(Arc::new(KitsuAdapter::new(config)?))
            .with(Arc::new(JikanAdapter::new(config)?))
            .with(Arc::new(ComicVineAdapter::new(config)?));

        log::info!(
            "Adapter registry initialized with {} sources",
            registry.adapters.len()
        );
        Ok(registry)
    }

    /// Register an adapter under the source it reports, replacing any previous one
    pub fn register(&mut self, adapter: Arc<dyn MangaSourceAdapter>) {
        self.adapters.insert(adapter.source(), adapter);
    }

    pub fn with(mut self, adapter: Arc<dyn MangaSourceAdapter>) -> Self {
        self.register(adapter);
        self
    }

    pub fn get(&self, source: MangaSource) -> Option<Arc<dyn MangaSourceAdapter>> {
        self.adapters.get(&source).cloned()
    }

    /// Adapter for a free-form source name; unknown names use the primary source
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn MangaSourceAdapter>> {
        self.get(MangaSource::from_name_or_primary(name))
    }

    pub fn sources(&self) -> Vec<MangaSource> {
        let mut sources: Vec<_> = self.adapters.keys().copied().collect();
        sources.sort();
        sources
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("sources", &self.sources())
            .finish()
    }
}
