use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{
    modules::provider::domain::{CatalogDetail, CatalogEntry, MangaSource, SearchCriteria},
    modules::provider::infrastructure::adapters::common::{
        absorb_detail, absorb_list, client_for, page_size, require_credential, QueryParams,
    },
    modules::provider::infrastructure::http_client::{RateLimitClient, RetryPolicy},
    modules::provider::traits::{MangaSourceAdapter, RateLimiterInfo},
    shared::config::CatalogConfig,
    shared::errors::{AppError, AppResult},
};

use super::mapper::MyAnimeListMapper;
use super::models::*;

const MAX_PAGE_SIZE: usize = 100;
const CLIENT_ID_HEADER: &str = "x-mal-client-id";
const LIST_FIELDS: &str =
    "id,title,main_picture,synopsis,genres,authors{first_name,last_name},status,start_date,mean,num_list_users";
const DETAIL_FIELDS: &str = "id,title,main_picture,alternative_titles,synopsis,genres,\
authors{first_name,last_name},status,start_date,mean,num_list_users,num_volumes,num_chapters,nsfw,recommendations";

/// Official MyAnimeList API adapter. Every call needs a client id.
pub struct MyAnimeListAdapter {
    http_client: RateLimitClient,
    base_url: String,
    client_id: Option<String>,
    mapper: MyAnimeListMapper,
}

impl MyAnimeListAdapter {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let client_id = config.myanimelist_client_id.clone();
        let http_client = client_for(
            config,
            MangaSource::MyAnimeList,
            RetryPolicy::standard(),
            Self::client_id_headers(client_id.as_deref()),
        )?;
        Ok(Self::with_client(
            http_client,
            &config.myanimelist.base_url,
            client_id,
        ))
    }

    /// Create adapter with custom HTTP client (for testing). The client must
    /// already carry the client id header, see [`Self::client_id_headers`].
    pub fn with_client(
        http_client: RateLimitClient,
        base_url: &str,
        client_id: Option<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id,
            mapper: MyAnimeListMapper::new(),
        }
    }

    pub fn client_id_headers(client_id: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = client_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .and_then(|id| HeaderValue::from_str(id).ok())
        {
            headers.insert(HeaderName::from_static(CLIENT_ID_HEADER), value);
        }
        headers
    }

    fn ensure_client_id(&self) -> AppResult<()> {
        require_credential(
            MangaSource::MyAnimeList,
            "client ID",
            self.client_id.as_deref(),
        )
        .map(|_| ())
    }

    fn mal_id(id: &str) -> AppResult<u64> {
        id.trim()
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Invalid MyAnimeList ID: {}", id)))
    }
}

impl MyAnimeListAdapter {
    pub async fn try_popular(&self, limit: usize) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.ensure_client_id()?;
        log::info!("MyAnimeList: Getting popular manga (limit: {})", limit);

        let query = QueryParams::new()
            .push("ranking_type", "bypopularity")
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push("fields", LIST_FIELDS);

        self.list_manga("/manga/ranking", query).await
    }

    pub async fn try_search_by_title(
        &self,
        title: &str,
        limit: usize,
    ) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 || title.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.ensure_client_id()?;
        log::info!("MyAnimeList: Searching for '{}' (limit: {})", title, limit);

        let query = QueryParams::new()
            .push("q", title.trim())
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push("fields", LIST_FIELDS);

        self.list_manga("/manga", query).await
    }

    pub async fn try_detail(&self, id: &str) -> AppResult<Option<CatalogDetail>> {
        self.ensure_client_id()?;
        let mal_id = Self::mal_id(id)?;
        log::info!("MyAnimeList: Getting manga by ID '{}'", mal_id);

        let query = QueryParams::new().push("fields", DETAIL_FIELDS);
        let manga: Manga = self
            .http_client
            .get_json(
                &format!("{}/manga/{}", self.base_url, mal_id),
                query.as_slice(),
            )
            .await?;

        Ok(Some(self.mapper.map_detail(&manga)))
    }

    async fn list_manga(&self, path: &str, query: QueryParams) -> AppResult<Vec<CatalogEntry>> {
        let response: MalPaged<MalNode<Manga>> = self
            .http_client
            .get_json(&format!("{}{}", self.base_url, path), query.as_slice())
            .await?;

        Ok(response
            .data
            .iter()
            .map(|item| self.mapper.map_manga(&item.node))
            .collect())
    }
}

#[async_trait]
impl MangaSourceAdapter for MyAnimeListAdapter {
    fn source(&self) -> MangaSource {
        MangaSource::MyAnimeList
    }

    fn rate_limit_info(&self) -> RateLimiterInfo {
        RateLimiterInfo::from_interval(self.http_client.min_interval())
    }

    async fn fetch_popular(&self, limit: usize) -> Vec<CatalogEntry> {
        absorb_list(self.source(), "popular", self.try_popular(limit).await)
    }

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
}
