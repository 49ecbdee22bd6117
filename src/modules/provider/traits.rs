use crate::modules::provider::domain::{
    CatalogDetail, CatalogEntry, ChapterEntry, ChapterImage, MangaSource, SearchCriteria,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Capability interface implemented by every upstream catalog adapter.
///
/// Operations a source cannot serve keep the default body and return an empty
/// list or `None`. Implementations absorb upstream failures the same way, so
/// callers never see an error from an adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MangaSourceAdapter: Send + Sync {
    /// Get the source this adapter serves
    fn source(&self) -> MangaSource;

    /// Get rate limiter info from the actual client (single source of truth)
    fn rate_limit_info(&self) -> RateLimiterInfo;

    async fn fetch_latest(&self, _limit: usize) -> Vec<ChapterEntry> {
        Vec::new()
    }

    async fn fetch_popular(&self, _limit: usize) -> Vec<CatalogEntry> {
        Vec::new()
    }

    async fn search(&self, _criteria: &SearchCriteria, _limit: usize) -> Vec<CatalogEntry> {
        Vec::new()
    }

    async fn fetch_detail(&self, _id: &str) -> Option<CatalogDetail> {
        None
    }

    async fn fetch_chapters(&self, _manga_id: &str) -> Vec<ChapterEntry> {
        Vec::new()
    }

    async fn fetch_chapter_images(&self, _chapter_id: &str) -> Vec<ChapterImage> {
        Vec::new()
    }

    async fn fetch_by_genre(&self, _genre: &str, _limit: usize) -> Vec<CatalogEntry> {
        Vec::new()
    }

    async fn fetch_similar(&self, _manga_id: &str, _limit: usize) -> Vec<CatalogEntry> {
        Vec::new()
    }
}

/// Rate limiter information from the actual client implementation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimiterInfo {
    /// Requests per second (0 when unpaced)
    pub requests_per_second: f64,
    /// Requests per minute (derived)
    pub requests_per_minute: u32,
    /// Minimum delay between requests (in milliseconds)
    pub min_delay_ms: u32,
}

impl RateLimiterInfo {
    pub fn from_interval(min_interval: Duration) -> Self {
        if min_interval.is_zero() {
            return Self {
                requests_per_second: 0.0,
                requests_per_minute: 0,
                min_delay_ms: 0,
            };
        }

        let requests_per_second = 1.0 / min_interval.as_secs_f64();
        Self {
            requests_per_second,
            requests_per_minute: (requests_per_second * 60.0) as u32,
            min_delay_ms: min_interval.as_millis() as u32,
        }
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_info_from_interval() {
        let info = RateLimiterInfo::from_interval(Duration::from_secs(2));
        assert_eq!(info.requests_per_minute, 30);
        assert_eq!(info.min_delay(), Duration::from_secs(2));

        let unpaced = RateLimiterInfo::from_interval(Duration::ZERO);
        assert_eq!(unpaced.min_delay_ms, 0);
    }
}
