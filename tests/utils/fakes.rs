//! In-process adapter double with canned results and a call log

use async_trait::async_trait;
use manga_hub_lib::modules::provider::domain::{
    CatalogDetail, CatalogEntry, ChapterEntry, ChapterImage, MangaSource, SearchCriteria,
};
use manga_hub_lib::modules::provider::{MangaSourceAdapter, RateLimiterInfo};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records `(operation, limit)` for every call an adapter receives
#[derive(Debug, Default)]
pub struct CallLog {
    calls: Mutex<Vec<(String, Option<usize>)>>,
}

impl CallLog {
    fn record(&self, operation: &str, limit: Option<usize>) {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push((operation.to_string(), limit));
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .expect("call log poisoned")
            .iter()
            .filter(|(op, _)| op == operation)
            .count()
    }

    pub fn limits(&self, operation: &str) -> Vec<Option<usize>> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .iter()
            .filter(|(op, _)| op == operation)
            .map(|(_, limit)| *limit)
            .collect()
    }

    pub fn total(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }
}

#[derive(Default)]
struct Canned {
    latest: Vec<ChapterEntry>,
    popular: Vec<CatalogEntry>,
    search: Vec<CatalogEntry>,
    detail: Option<CatalogDetail>,
    chapters: Vec<ChapterEntry>,
    images: Vec<ChapterImage>,
    by_genre: Vec<CatalogEntry>,
    similar: Vec<CatalogEntry>,
}

pub struct FakeAdapter {
    source: MangaSource,
    canned: Canned,
    delay: Duration,
    calls: Arc<CallLog>,
}

impl FakeAdapter {
    pub fn new(source: MangaSource) -> Self {
        Self {
            source,
            canned: Canned::default(),
            delay: Duration::ZERO,
            calls: Arc::new(CallLog::default()),
        }
    }

    pub fn calls(&self) -> Arc<CallLog> {
        self.calls.clone()
    }

    pub fn with_latest(mut self, latest: Vec<ChapterEntry>) -> Self {
        self.canned.latest = latest;
        self
    }

    pub fn with_popular(mut self, popular: Vec<CatalogEntry>) -> Self {
        self.canned.popular = popular;
        self
    }

    pub fn with_search(mut self, search: Vec<CatalogEntry>) -> Self {
        self.canned.search = search;
        self
    }

    pub fn with_detail(mut self, detail: CatalogDetail) -> Self {
        self.canned.detail = Some(detail);
        self
    }

    pub fn with_chapters(mut self, chapters: Vec<ChapterEntry>) -> Self {
        self.canned.chapters = chapters;
        self
    }

    pub fn with_images(mut self, images: Vec<ChapterImage>) -> Self {
        self.canned.images = images;
        self
    }

    pub fn with_by_genre(mut self, by_genre: Vec<CatalogEntry>) -> Self {
        self.canned.by_genre = by_genre;
        self
    }

    pub fn with_similar(mut self, similar: Vec<CatalogEntry>) -> Self {
        self.canned.similar = similar;
        self
    }

    /// Every call sleeps this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn answer<T: Clone>(&self, operation: &str, limit: Option<usize>, items: &[T]) -> Vec<T> {
        self.calls.record(operation, limit);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let take = limit.unwrap_or(items.len());
        items.iter().take(take).cloned().collect()
    }
}

#[async_trait]
impl MangaSourceAdapter for FakeAdapter {
    fn source(&self) -> MangaSource {
        self.source
    }

    fn rate_limit_info(&self) -> RateLimiterInfo {
        RateLimiterInfo::from_interval(Duration::ZERO)
    }

    async fn fetch_latest(&self, limit: usize) -> Vec<ChapterEntry> {
        self.answer("latest", Some(limit), &self.canned.latest).await
    }

    async fn fetch_popular(&self, limit: usize) -> Vec<CatalogEntry> {
        self.answer("popular", Some(limit), &self.canned.popular).await
    }

    async fn search(&self, _criteria: &SearchCriteria, limit: usize) -> Vec<CatalogEntry> {
        self.answer("search", Some(limit), &self.canned.search).await
    }

    async fn fetch_detail(&self, _id: &str) -> Option<CatalogDetail> {
        let detail = self.canned.detail.iter().cloned().collect::<Vec<_>>();
        self.answer("detail", None, &detail).await.into_iter().next()
    }

    async fn fetch_chapters(&self, _manga_id: &str) -> Vec<ChapterEntry> {
        self.answer("chapters", None, &self.canned.chapters).await
    }

    async fn fetch_chapter_images(&self, _chapter_id: &str) -> Vec<ChapterImage> {
        self.answer("images", None, &self.canned.images).await
    }

    async fn fetch_by_genre(&self, _genre: &str, limit: usize) -> Vec<CatalogEntry> {
        self.answer("by_genre", Some(limit), &self.canned.by_genre).await
    }

    async fn fetch_similar(&self, _manga_id: &str, limit: usize) -> Vec<CatalogEntry> {
        self.answer("similar", Some(limit), &self.canned.similar).await
    }
}

pub fn entry(source: MangaSource, id: &str, popularity: f64) -> CatalogEntry {
    CatalogEntry::new(id, source, format!("Title {}", id)).with_popularity(popularity)
}

pub fn chapter(source: MangaSource, id: &str, title: &str) -> ChapterEntry {
    ChapterEntry::new(id, "m1", source).titled(title)
}
