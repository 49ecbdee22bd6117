use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    modules::provider::domain::{
        CatalogDetail, CatalogEntry, ChapterEntry, ChapterImage, MangaSource, PublicationStatus,
        RandomSource, SearchCriteria, ThreadRandomSource,
    },
    modules::provider::infrastructure::adapters::common::{
        absorb_detail, absorb_list, client_for, page_size, QueryParams,
    },
    modules::provider::infrastructure::http_client::{RateLimitClient, RetryPolicy},
    modules::provider::traits::{MangaSourceAdapter, RateLimiterInfo},
    shared::config::CatalogConfig,
    shared::errors::{AppError, AppResult},
};

use super::mapper::MangaDexMapper;
use super::models::*;

const MAX_PAGE_SIZE: usize = 100;
const MANGA_INCLUDES: [&str; 3] = ["cover_art", "author", "artist"];

/// MangaDex adapter - primary source, the only one serving chapter pages
pub struct MangaDexAdapter {
    http_client: RateLimitClient,
    base_url: String,
    locale: String,
    mapper: MangaDexMapper,
    random: Arc<dyn RandomSource>,
}

impl MangaDexAdapter {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let http_client = client_for(
            config,
            MangaSource::MangaDex,
            RetryPolicy::standard(),
            Default::default(),
        )?;
        Ok(Self::with_client(
            http_client,
            &config.mangadex.base_url,
            &config.locale,
        ))
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, base_url: &str, locale: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            locale: locale.to_string(),
            mapper: MangaDexMapper::new(locale),
            random: Arc::new(ThreadRandomSource),
        }
    }

    /// Replace the random source used to pick a genre for similar titles
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn status_filter(status: PublicationStatus) -> Option<&'static str> {
        match status {
            PublicationStatus::Ongoing => Some("ongoing"),
            PublicationStatus::Completed => Some("completed"),
            PublicationStatus::Hiatus => Some("hiatus"),
            PublicationStatus::Cancelled => Some("cancelled"),
            PublicationStatus::NotPublished | PublicationStatus::Unknown => None,
        }
    }
}

impl MangaDexAdapter {
    pub async fn try_latest(&self, limit: usize) -> AppResult<Vec<ChapterEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        log::info!("MangaDex: Getting latest chapters (limit: {})", limit);

        let query = QueryParams::new()
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push("order[publishAt]", "desc")
            .push("includes[]", "manga");

        let response: MangaDexList<Chapter> = self
            .http_client
            .get_json(&self.url("/chapter"), query.as_slice())
            .await?;

        Ok(response
            .data
            .iter()
            .map(|chapter| self.mapper.map_chapter(chapter, ""))
            .collect())
    }

    pub async fn try_popular(&self, limit: usize) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        log::info!("MangaDex: Getting popular manga (limit: {})", limit);

        let query = QueryParams::new()
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push("order[followedCount]", "desc")
            .push("hasAvailableChapters", "true")
            .push_all("includes[]", MANGA_INCLUDES);

        self.list_manga(query).await
    }

    pub async fn try_search(
        &self,
        criteria: &SearchCriteria,
        limit: usize,
    ) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        log::info!(
            "MangaDex: Searching for {:?} (limit: {})",
            criteria.title_term(),
            limit
        );

        let genres: Vec<&String> = criteria
            .genres
            .iter()
            .filter(|g| !g.trim().is_empty())
            .collect();
        let tags = if genres.is_empty() {
            Vec::new()
        } else {
            self.fetch_tags().await?
        };

        let mut tag_ids = Vec::new();
        for genre in genres {
            match Self::find_tag_id(&tags, genre) {
                Some(id) => tag_ids.push(id),
                None => {
                    log::info!("MangaDex: Unknown genre '{}', no results possible", genre);
                    return Ok(Vec::new());
                }
            }
        }

        let query = QueryParams::new()
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push_all("includes[]", MANGA_INCLUDES)
            .push_opt("title", criteria.title_term())
            .push_opt("author", criteria.author_term())
            .push_opt("year", criteria.year)
            .push_all("includedTags[]", tag_ids)
            .push_opt("status[]", criteria.status.and_then(Self::status_filter));

        self.list_manga(query).await
    }

    pub async fn try_detail(&self, id: &str) -> AppResult<Option<CatalogDetail>> {
        log::info!("MangaDex: Getting manga by ID '{}'", id);

        let query = QueryParams::new().push_all("includes[]", MANGA_INCLUDES);
        let response: MangaDexItem<Manga> = self
            .http_client
            .get_json(
                &self.url(&format!("/manga/{}", urlencoding::encode(id))),
                query.as_slice(),
            )
            .await?;

        Ok(Some(self.mapper.map_detail(&response.data)))
    }

    pub async fn try_chapters(&self, manga_id: &str) -> AppResult<Vec<ChapterEntry>> {
        log::info!("MangaDex: Getting chapters for manga '{}'", manga_id);

        let query = QueryParams::new()
            .push("manga", manga_id)
            .push("limit", MAX_PAGE_SIZE)
            .push("order[volume]", "asc")
            .push("order[chapter]", "asc")
            .push("translatedLanguage[]", &self.locale)
            .push("includes[]", "manga");

        let response: MangaDexList<Chapter> = self
            .http_client
            .get_json(&self.url("/chapter"), query.as_slice())
            .await?;

        let chapters: Vec<ChapterEntry> = response
            .data
            .iter()
            .map(|chapter| self.mapper.map_chapter(chapter, manga_id))
            .collect();

        log::info!(
            "MangaDex: Found {} chapters for manga '{}'",
            chapters.len(),
            manga_id
        );
        Ok(chapters)
    }

    pub async fn try_chapter_images(&self, chapter_id: &str) -> AppResult<Vec<ChapterImage>> {
        log::info!("MangaDex: Getting pages for chapter '{}'", chapter_id);

        let server: AtHomeServer = self
            .http_client
            .get_json(
                &self.url(&format!(
                    "/at-home/server/{}",
                    urlencoding::encode(chapter_id)
                )),
                &[],
            )
            .await?;

        Ok(MangaDexMapper::map_images(&server))
    }

    pub async fn try_by_genre(&self, genre: &str, limit: usize) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        log::info!("MangaDex: Getting manga for genre '{}' (limit: {})", genre, limit);

        let Some(tag_id) = self.resolve_tag_id(genre).await? else {
            log::info!("MangaDex: No tag matches genre '{}'", genre);
            return Ok(Vec::new());
        };

        let query = QueryParams::new()
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push("includedTags[]", tag_id)
            .push_all("includes[]", MANGA_INCLUDES)
            .push("order[followedCount]", "desc");

        self.list_manga(query).await
    }

    /// Titles sharing one randomly chosen genre with the target
    pub async fn try_similar(&self, manga_id: &str, limit: usize) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let Some(detail) = self.try_detail(manga_id).await? else {
            return Ok(Vec::new());
        };

        let genres = detail.genres();
        if genres.is_empty() {
            log::info!(
                "MangaDex: Manga '{}' has no genres, skipping similar lookup",
                manga_id
            );
            return Ok(Vec::new());
        }

        let genre = &genres[self.random.pick_index(genres.len()).min(genres.len() - 1)];
        log::info!(
            "MangaDex: Finding titles similar to '{}' via genre '{}'",
            manga_id,
            genre
        );

        let mut similar = self.try_by_genre(genre, limit.saturating_add(1)).await?;
        similar.retain(|entry| entry.id != manga_id);
        similar.truncate(limit);
        Ok(similar)
    }

    async fn list_manga(&self, query: QueryParams) -> AppResult<Vec<CatalogEntry>> {
        let response: MangaDexList<Manga> = self
            .http_client
            .get_json(&self.url("/manga"), query.as_slice())
            .await?;

        let entries: Vec<CatalogEntry> = response
            .data
            .iter()
            .map(|manga| self.mapper.map_manga(manga))
            .collect();

        log::info!("MangaDex: Found {} manga", entries.len());
        Ok(entries)
    }

    async fn fetch_tags(&self) -> AppResult<Vec<Tag>> {
        let tags: MangaDexList<Tag> = self
            .http_client
            .get_json(&self.url("/manga/tag"), &[])
            .await?;
        Ok(tags.data)
    }

    async fn resolve_tag_id(&self, genre: &str) -> AppResult<Option<String>> {
        Ok(Self::find_tag_id(&self.fetch_tags().await?, genre))
    }

    /// Tag id whose English name matches `genre` case-insensitively
    fn find_tag_id(tags: &[Tag], genre: &str) -> Option<String> {
        let wanted = genre.trim().to_lowercase();
        tags.iter()
            .find(|tag| {
                tag.attributes
                    .name
                    .get("en")
                    .is_some_and(|name| name.to_lowercase() == wanted)
            })
            .map(|tag| tag.id.clone())
    }

    /// Check if a request can be made immediately (for testing and monitoring)
    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }
}

#[async_trait]
impl MangaSourceAdapter for MangaDexAdapter {
    fn source(&self) -> MangaSource {
        MangaSource::MangaDex
    }

    fn rate_limit_info(&self) -> RateLimiterInfo {
        RateLimiterInfo::from_interval(self.http_client.min_interval())
    }

    async fn fetch_latest(&self, limit: usize) -> Vec<ChapterEntry> {
        absorb_list(self.source(), "latest", self.try_latest(limit).await)
    }

    async fn fetch_popular(&self, limit: usize) -> Vec<CatalogEntry> {
        absorb_list(self.source(), "popular", self.try_popular(limit).await)
    }

    async fn search(&self, criteria: &SearchCriteria, limit: usize) -> Vec<CatalogEntry> {
        absorb_list(self.source(), "search", self.try_search(criteria, limit).await)
    }

    async fn fetch_detail(&self, id: &str) -> Option<CatalogDetail> {
        absorb_detail(self.source(), "detail", id, self.try_detail(id).await)
    }

    async fn fetch_chapters(&self, manga_id: &str) -> Vec<ChapterEntry> {
        absorb_list(self.source(), "chapters", self.try_chapters(manga_id).await)
    }

    async fn fetch_chapter_images(&self, chapter_id: &str) -> Vec<ChapterImage> {
        absorb_list(
            self.source(),
            "chapter images",
            self.try_chapter_images(chapter_id).await,
        )
    }

    async fn fetch_by_genre(&self, genre: &str, limit: usize) -> Vec<CatalogEntry> {
        absorb_list(self.source(), "by genre", self.try_by_genre(genre, limit).await)
    }

    async fn fetch_similar(&self, manga_id: &str, limit: usize) -> Vec<CatalogEntry> {
        match self.try_similar(manga_id, limit).await {
            // An unknown target simply has no similar titles
            Err(AppError::NotFound(_)) => Vec::new(),
            other => absorb_list(self.source(), "similar", other),
        }
    }
}
