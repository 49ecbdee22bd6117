//! Aggregated catalog queries over every configured source
//!
//! Each operation is read through the cache layer. On a miss it fans out to
//! its adapters, each call bounded by the adapter timeout, and merges the
//! partial lists in a fixed source order regardless of arrival order.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::modules::aggregation::domain::merge::{
    dedup_chapters_by_title, dedup_entries_by_id, rank_by_popularity, weighted_share,
};
use crate::modules::aggregation::domain::CacheKey;
use crate::modules::aggregation::infrastructure::cache::{CacheLayer, CacheStats};
use crate::modules::provider::domain::{
    sort_chapters, CatalogDetail, CatalogEntry, ChapterEntry, ChapterImage, MangaSource,
    SearchCriteria,
};
use crate::modules::provider::{AdapterRegistry, MangaSourceAdapter};
use crate::shared::config::CatalogConfig;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::{LogContext, TimedOperation};

const LATEST_PRIMARY: MangaSource = MangaSource::MangaDex;
const LATEST_SECONDARY: MangaSource = MangaSource::Kitsu;
const SEARCH_PRIMARY: MangaSource = MangaSource::MangaDex;
const SEARCH_SECONDARY: MangaSource = MangaSource::Jikan;
/// Sources and their share of `limit` in tenths, in merge order
const POPULAR_SPLIT: [(MangaSource, usize); 3] = [
    (MangaSource::MangaDex, 5),
    (MangaSource::MyAnimeList, 3),
    (MangaSource::Jikan, 2),
];
const GENRE_SPLIT: [(MangaSource, usize); 2] = [(MangaSource::MangaDex, 6), (MangaSource::Jikan, 4)];

pub struct MangaAggregator {
    registry: AdapterRegistry,
    cache: Arc<CacheLayer>,
    adapter_timeout: Duration,
}

impl MangaAggregator {
    pub fn new(registry: AdapterRegistry, cache: Arc<CacheLayer>, adapter_timeout: Duration) -> Self {
        Self {
            registry,
            cache,
            adapter_timeout,
        }
    }

    /// Production adapters with an in-memory cache
    pub fn from_config(config: &CatalogConfig) -> AppResult<Self> {
        Ok(Self::new(
            AdapterRegistry::from_config(config)?,
            Arc::new(CacheLayer::in_memory(config.cache_max_entries)),
            config.adapter_timeout,
        ))
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Newest chapters from the primary source, topped up from the secondary
    /// source when short, deduplicated by chapter title
    pub async fn get_latest_releases(&self, limit: usize) -> AppResult<Vec<ChapterEntry>> {
        let key = CacheKey::Latest { limit };
        self.cache
            .with_cache(&key.render(), key.ttl(), || async {
                let timer = TimedOperation::new("latest releases");

                let mut results = self
                    .call_source(LATEST_PRIMARY, "latest", |a| async move {
                        a.fetch_latest(limit).await
                    })
                    .await;
                let primary_count = results.len();

                let mut secondary_count = 0;
                if results.len() < limit {
                    let needed = limit - results.len();
                    let mut extra = self
                        .call_source(LATEST_SECONDARY, "latest", |a| async move {
                            a.fetch_latest(needed).await
                        })
                        .await;
                    extra.truncate(needed);
                    secondary_count = extra.len();
                    results.extend(extra);
                }

                // The shortfall is not recomputed after dedup, so the list may undershoot
                let mut merged = dedup_chapters_by_title(results);
                merged.truncate(limit);

                LogContext::aggregation(
                    "latest releases",
                    &[
                        (LATEST_PRIMARY.as_str(), primary_count),
                        (LATEST_SECONDARY.as_str(), secondary_count),
                    ],
                    merged.len(),
                );
                timer.finish();
                Ok(merged)
            })
            .await
    }

    /// Weighted fan-out ranked by raw popularity. Scores come in each source's
    /// own unit (followers, members) and are compared as-is.
    pub async fn get_popular_manga(&self, limit: usize) -> AppResult<Vec<CatalogEntry>> {
        let key = CacheKey::Popular { limit };
        self.cache
            .with_cache(&key.render(), key.ttl(), || async {
                let timer = TimedOperation::new("popular manga");
                let [first, second, third] =
                    POPULAR_SPLIT.map(|(source, tenths)| (source, weighted_share(limit, tenths)));

                let (a, b, c) = futures::join!(
                    self.popular_from(first.0, first.1),
                    self.popular_from(second.0, second.1),
                    self.popular_from(third.0, third.1),
                );

                let contributions = [
                    (first.0.as_str(), a.len()),
                    (second.0.as_str(), b.len()),
                    (third.0.as_str(), c.len()),
                ];

                let mut merged: Vec<CatalogEntry> = a.into_iter().chain(b).chain(c).collect();
                rank_by_popularity(&mut merged);
                merged.truncate(limit);

                LogContext::aggregation("popular manga", &contributions, merged.len());
                timer.finish();
                Ok(merged)
            })
            .await
    }

    async fn popular_from(&self, source: MangaSource, share: usize) -> Vec<CatalogEntry> {
        if share == 0 {
            return Vec::new();
        }
        self.call_source(source, "popular", |a| async move {
            let mut entries = a.fetch_popular(share).await;
            entries.truncate(share);
            entries
        })
        .await
    }

    /// Full-criteria search on the primary source, topped up with a title-only
    /// search on the secondary source, deduplicated by id
    pub async fn search_manga(
        &self,
        criteria: &SearchCriteria,
        limit: usize,
    ) -> AppResult<Vec<CatalogEntry>> {
        let key = CacheKey::Search { criteria, limit };
        self.cache
            .with_cache(&key.render(), key.ttl(), || async {
                let timer = TimedOperation::new("search manga");

                let mut results = self
                    .call_source(SEARCH_PRIMARY, "search", |a| async move {
                        a.search(criteria, limit).await
                    })
                    .await;
                let primary_count = results.len();

                let mut secondary_count = 0;
                if results.len() < limit && criteria.title_term().is_some() {
                    let needed = limit - results.len();
                    let title_only = criteria.title_only();
                    let title_only = &title_only;
                    let extra = self
                        .call_source(SEARCH_SECONDARY, "search", |a| async move {
                            a.search(title_only, needed).await
                        })
                        .await;
                    secondary_count = extra.len();
                    results.extend(extra);
                }

                let mut merged = dedup_entries_by_id(results);
                merged.truncate(limit);

                LogContext::aggregation(
                    "search manga",
                    &[
                        (SEARCH_PRIMARY.as_str(), primary_count),
                        (SEARCH_SECONDARY.as_str(), secondary_count),
                    ],
                    merged.len(),
                );
                timer.finish();
                Ok(merged)
            })
            .await
    }

    /// Detail record from the named source. Not-found results are not cached.
    pub async fn get_manga_details(
        &self,
        id: &str,
        source: &str,
    ) -> AppResult<Option<CatalogDetail>> {
        let source = MangaSource::from_name_or_primary(source);
        let key = CacheKey::Details { source, id };
        self.cache
            .with_cache_when(&key.render(), key.ttl(), Option::is_some, || async {
                Ok(self
                    .call_source(source, "detail", |a| async move { a.fetch_detail(id).await })
                    .await)
            })
            .await
    }

    /// Chapters of one manga ordered by volume then chapter number
    pub async fn get_manga_chapters(
        &self,
        manga_id: &str,
        source: &str,
    ) -> AppResult<Vec<ChapterEntry>> {
        let source = MangaSource::from_name_or_primary(source);
        let key = CacheKey::Chapters { source, manga_id };
        self.cache
            .with_cache(&key.render(), key.ttl(), || async {
                let mut chapters = self
                    .call_source(source, "chapters", |a| async move {
                        a.fetch_chapters(manga_id).await
                    })
                    .await;
                sort_chapters(&mut chapters);
                Ok(chapters)
            })
            .await
    }

    /// Page images of one chapter. Empty means unavailable from that source.
    pub async fn get_chapter_images(
        &self,
        chapter_id: &str,
        source: &str,
    ) -> AppResult<Vec<ChapterImage>> {
        let source = MangaSource::from_name_or_primary(source);
        let key = CacheKey::Images { source, chapter_id };
        self.cache
            .with_cache(&key.render(), key.ttl(), || async {
                Ok(self
                    .call_source(source, "chapter images", |a| async move {
                        a.fetch_chapter_images(chapter_id).await
                    })
                    .await)
            })
            .await
    }

    pub async fn get_manga_by_genre(
        &self,
        genre: &str,
        limit: usize,
    ) -> AppResult<Vec<CatalogEntry>> {
        let key = CacheKey::Genre { genre, limit };
        self.cache
            .with_cache(&key.render(), key.ttl(), || async {
                let timer = TimedOperation::new("manga by genre");
                let [first, second] =
                    GENRE_SPLIT.map(|(source, tenths)| (source, weighted_share(limit, tenths)));

                let a = self.genre_from(first.0, genre, first.1).await;
                let b = self.genre_from(second.0, genre, second.1).await;
                let contributions = [(first.0.as_str(), a.len()), (second.0.as_str(), b.len())];

                let mut merged = dedup_entries_by_id(a.into_iter().chain(b).collect());
                merged.truncate(limit);

                LogContext::aggregation("manga by genre", &contributions, merged.len());
                timer.finish();
                Ok(merged)
            })
            .await
    }

    async fn genre_from(&self, source: MangaSource, genre: &str, share: usize) -> Vec<CatalogEntry> {
        if share == 0 {
            return Vec::new();
        }
        self.call_source(source, "by genre", |a| async move {
            a.fetch_by_genre(genre, share).await
        })
        .await
    }

    /// Source-specific similar titles; sources without a strategy return empty
    pub async fn get_similar_manga(
        &self,
        manga_id: &str,
        source: &str,
        limit: usize,
    ) -> AppResult<Vec<CatalogEntry>> {
        let source = MangaSource::from_name_or_primary(source);
        let key = CacheKey::Similar {
            source,
            manga_id,
            limit,
        };
        self.cache
            .with_cache(&key.render(), key.ttl(), || async {
                if limit == 0 {
                    return Ok(Vec::new());
                }
                let mut similar = self
                    .call_source(source, "similar", |a| async move {
                        a.fetch_similar(manga_id, limit).await
                    })
                    .await;
                similar.truncate(limit);
                Ok(similar)
            })
            .await
    }

    /// Run one adapter call under the adapter timeout. A missing adapter or a
    /// timed-out call contributes the empty value.
    async fn call_source<T, F, Fut>(&self, source: MangaSource, operation: &str, call: F) -> T
    where
        T: Default,
        F: FnOnce(Arc<dyn MangaSourceAdapter>) -> Fut,
        Fut: Future<Output = T>,
    {
        let Some(adapter) = self.registry.get(source) else {
            log::warn!("No adapter registered for {}, skipping {}", source, operation);
            return T::default();
        };

        match tokio::time::timeout(self.adapter_timeout, call(adapter)).await {
            Ok(value) => value,
            Err(_) => {
                log::error!(
                    "{} {} timed out after {:?}",
                    source,
                    operation,
                    self.adapter_timeout
                );
                T::default()
            }
        }
    }
}
