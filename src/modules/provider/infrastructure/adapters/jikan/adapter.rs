use async_trait::async_trait;

use crate::{
    modules::provider::domain::{CatalogDetail, CatalogEntry, MangaSource, SearchCriteria},
    modules::provider::infrastructure::adapters::common::{
        absorb_detail, absorb_list, client_for, page_size, QueryParams,
    },
    modules::provider::infrastructure::http_client::{RateLimitClient, RetryPolicy},
    modules::provider::traits::{MangaSourceAdapter, RateLimiterInfo},
    shared::config::CatalogConfig,
    shared::errors::{AppError, AppResult},
};

use super::mapper::JikanMapper;
use super::models::*;

const MAX_PAGE_SIZE: usize = 25;

/// Jikan (MyAnimeList) adapter with REST API
///
/// Jikan throttles hard, so every call waits for the client's pacing
/// interval (2 seconds by default) before it is sent.
pub struct JikanAdapter {
    http_client: RateLimitClient,
    base_url: String,
    mapper: JikanMapper,
}

impl JikanAdapter {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let http_client = client_for(
            config,
            MangaSource::Jikan,
            RetryPolicy::jikan(),
            Default::default(),
        )?;
        Ok(Self::with_client(http_client, &config.jikan.base_url))
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            mapper: JikanMapper::new(),
        }
    }

    /// Check if a request can be made immediately (for testing and monitoring)
    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }

    fn mal_id(id: &str) -> AppResult<u32> {
        id.trim()
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Invalid MAL ID: {}", id)))
    }
}

impl JikanAdapter {
    pub async fn try_popular(&self, limit: usize) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        log::info!("Jikan: Getting top manga (limit: {})", limit);

        let query = QueryParams::new()
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push("type", "manga");

        self.list_manga("/top/manga", query).await
    }

    pub async fn try_search_by_title(
        &self,
        title: &str,
        limit: usize,
    ) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 || title.trim().is_empty() {
            return Ok(Vec::new());
        }
        log::info!("Jikan: Searching for '{}' (limit: {})", title, limit);

        let query = QueryParams::new()
            .push("q", title.trim())
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push("order_by", "popularity");

        let results = self.list_manga("/manga", query).await?;
        log::info!("Jikan: Found {} results for '{}'", results.len(), title);
        Ok(results)
    }

    pub async fn try_by_genre(&self, genre: &str, limit: usize) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let Some(genre_id) = JikanMapper::genre_id(genre) else {
            log::info!("Jikan: Genre '{}' has no known id, skipping", genre);
            return Ok(Vec::new());
        };

        log::info!(
            "Jikan: Getting manga for genre '{}' (id {}, limit: {})",
            genre,
            genre_id,
            limit
        );

        let query = QueryParams::new()
            .push("genres", genre_id)
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push("order_by", "popularity");

        self.list_manga("/manga", query).await
    }

    /// Get full manga details (comprehensive information)
    pub async fn try_detail(&self, id: &str) -> AppResult<Option<CatalogDetail>> {
        let mal_id = Self::mal_id(id)?;
        log::info!("Jikan: Getting full manga details for ID '{}'", mal_id);

        let response: JikanItem<MangaFull> = self
            .http_client
            .get_json(&format!("{}/manga/{}/full", self.base_url, mal_id), &[])
            .await?;

        Ok(Some(self.mapper.map_detail(&response.data)))
    }

    pub async fn try_similar(&self, manga_id: &str, limit: usize) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mal_id = Self::mal_id(manga_id)?;
        log::info!("Jikan: Getting recommendations for manga ID '{}'", mal_id);

        let response: JikanList<Recommendation> = self
            .http_client
            .get_json(
                &format!("{}/manga/{}/recommendations", self.base_url, mal_id),
                &[],
            )
            .await?;

        let mut similar = self.mapper.map_recommendations(response.data);
        similar.truncate(limit);
        Ok(similar)
    }

    async fn list_manga(&self, path: &str, query: QueryParams) -> AppResult<Vec<CatalogEntry>> {
        let response: JikanList<Manga> = self
            .http_client
            .get_json(&format!("{}{}", self.base_url, path), query.as_slice())
            .await?;

        Ok(response
            .data
            .iter()
            .map(|manga| self.mapper.map_manga(manga))
            .collect())
    }
}

#[async_trait]
impl MangaSourceAdapter for JikanAdapter {
    fn source(&self) -> MangaSource {
        MangaSource::Jikan
    }

    fn rate_limit_info(&self) -> RateLimiterInfo {
        RateLimiterInfo::from_interval(self.http_client.min_interval())
    }

    async fn fetch_popular(&self, limit: usize) -> Vec<CatalogEntry> {
        absorb_list(self.source(), "popular", self.try_popular(limit).await)
    }

    /// Jikan only supports the title term of a search
    async fn search(&self, criteria: &SearchCriteria, limit: usize) -> Vec<CatalogEntry> {
        let Some(title) = criteria.title_term() else {
            return Vec::new();
        };
        absorb_list(
            self.source(),
            "search",
            self.try_search_by_title(title, limit).await,
        )
    }

    async fn fetch_detail(&self, id: &str) -> Option<CatalogDetail> {
        absorb_detail(self.source(), "detail", id, self.try_detail(id).await)
    }

    async fn fetch_by_genre(&self, genre: &str, limit: usize) -> Vec<CatalogEntry> {
        absorb_list(self.source(), "by genre", self.try_by_genre(genre, limit).await)
    }

    async fn fetch_similar(&self, manga_id: &str, limit: usize) -> Vec<CatalogEntry> {
        absorb_list(
            self.source(),
            "similar",
            self.try_similar(manga_id, limit).await,
        )
    }
}
