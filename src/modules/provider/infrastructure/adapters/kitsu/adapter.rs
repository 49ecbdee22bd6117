use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::{
    modules::provider::domain::{CatalogDetail, ChapterEntry, MangaSource},
    modules::provider::infrastructure::adapters::common::{
        absorb_detail, absorb_list, client_for, page_size, QueryParams,
    },
    modules::provider::infrastructure::http_client::{RateLimitClient, RetryPolicy},
    modules::provider::traits::{MangaSourceAdapter, RateLimiterInfo},
    shared::config::CatalogConfig,
    shared::errors::AppResult,
};

use super::mapper::KitsuMapper;
use super::models::*;

const MAX_PAGE_SIZE: usize = 20;
const JSON_API: &str = "application/vnd.api+json";

/// Kitsu adapter (JSON:API). Serves latest chapters, details and chapter
/// listings; Kitsu hosts no page images.
pub struct KitsuAdapter {
    http_client: RateLimitClient,
    base_url: String,
    mapper: KitsuMapper,
}

impl KitsuAdapter {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let http_client = client_for(
            config,
            MangaSource::Kitsu,
            RetryPolicy::standard(),
            Self::json_api_headers(),
        )?;
        Ok(Self::with_client(
            http_client,
            &config.kitsu.base_url,
            &config.locale,
        ))
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, base_url: &str, locale: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            mapper: KitsuMapper::new(locale),
        }
    }

    pub fn json_api_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API));
        headers
    }
}

impl KitsuAdapter {
    pub async fn try_latest(&self, limit: usize) -> AppResult<Vec<ChapterEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        log::info!("Kitsu: Getting latest chapters (limit: {})", limit);

        let query = QueryParams::new()
            .push("page[limit]", page_size(limit, MAX_PAGE_SIZE))
            .push("sort", "-published_at")
            .push("include", "manga");

        let document: KitsuDocument<Vec<ChapterResource>> = self
            .http_client
            .get_json(&format!("{}/chapters", self.base_url), query.as_slice())
            .await?;

        Ok(document
            .data
            .iter()
            .map(|chapter| self.mapper.map_chapter(chapter, &document.included, ""))
            .collect())
    }

    pub async fn try_detail(&self, id: &str) -> AppResult<Option<CatalogDetail>> {
        log::info!("Kitsu: Getting manga by ID '{}'", id);

        let query = QueryParams::new().push("include", "genres,categories,staff.person");
        let document: KitsuDocument<MangaResource> = self
            .http_client
            .get_json(
                &format!("{}/manga/{}", self.base_url, urlencoding::encode(id)),
                query.as_slice(),
            )
            .await?;

        Ok(Some(
            self.mapper.map_detail(&document.data, &document.included),
        ))
    }

    pub async fn try_chapters(&self, manga_id: &str) -> AppResult<Vec<ChapterEntry>> {
        log::info!("Kitsu: Getting chapters for manga '{}'", manga_id);

        let query = QueryParams::new()
            .push("filter[manga_id]", manga_id)
            .push("page[limit]", MAX_PAGE_SIZE)
            .push("sort", "number");

        let document: KitsuDocument<Vec<ChapterResource>> = self
            .http_client
            .get_json(&format!("{}/chapters", self.base_url), query.as_slice())
            .await?;

        Ok(document
            .data
            .iter()
            .map(|chapter| self.mapper.map_chapter(chapter, &document.included, manga_id))
            .collect())
    }
}

#[async_trait]
impl MangaSourceAdapter for KitsuAdapter {
    fn source(&self) -> MangaSource {
        MangaSource::Kitsu
    }

    fn rate_limit_info(&self) -> RateLimiterInfo {
        RateLimiterInfo::from_interval(self.http_client.min_interval())
    }

    async fn fetch_latest(&self, limit: usize) -> Vec<ChapterEntry> {
        absorb_list(self.source(), "latest", self.try_latest(limit).await)
    }

    async fn fetch_detail(&self, id: &str) -> Option<CatalogDetail> {
        absorb_detail(self.source(), "detail", id, self.try_detail(id).await)
    }

    async fn fetch_chapters(&self, manga_id: &str) -> Vec<ChapterEntry> {
        absorb_list(self.source(), "chapters", self.try_chapters(manga_id).await)
    }
}
