use async_trait::async_trait;
use serde::de::DeserializeOwned;

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

use super::mapper::ComicVineMapper;
use super::models::*;

const MAX_PAGE_SIZE: usize = 100;
const STATUS_OK: i32 = 1;
const STATUS_INVALID_KEY: i32 = 100;
const STATUS_NOT_FOUND: i32 = 101;
const LIST_FIELDS: &str = "id,api_detail_url,name,description,image,publisher,start_year,\
first_issue,last_issue,count_of_issues";
const DETAIL_FIELDS: &str = "id,api_detail_url,name,description,image,publisher,start_year,\
first_issue,last_issue,count_of_issues,characters,people,concepts";

/// ComicVine adapter. Western comics catalog, keyed by API key.
pub struct ComicVineAdapter {
    http_client: RateLimitClient,
    base_url: String,
    api_key: Option<String>,
    mapper: ComicVineMapper,
}

impl ComicVineAdapter {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let http_client = client_for(
            config,
            MangaSource::ComicVine,
            RetryPolicy::standard(),
            Default::default(),
        )?;
        Ok(Self::with_client(
            http_client,
            &config.comicvine.base_url,
            config.comicvine_api_key.clone(),
        ))
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(
        http_client: RateLimitClient,
        base_url: &str,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            mapper: ComicVineMapper::new(),
        }
    }

    /// Base query every call carries
    fn authenticated_query(&self) -> AppResult<QueryParams> {
        let api_key = require_credential(
            MangaSource::ComicVine,
            "API key",
            self.api_key.as_deref(),
        )?;
        Ok(QueryParams::new()
            .push("api_key", api_key)
            .push("format", "json"))
    }

    /// `filter=` value for a search; browsing collections when nothing applies
    pub fn search_filter(criteria: &SearchCriteria) -> String {
        let mut filters = Vec::new();
        if let Some(title) = criteria.title_term() {
            filters.push(format!("name:{}", title));
        }
        if let Some(year) = criteria.year {
            filters.push(format!("start_year:{}", year));
        }

        if filters.is_empty() {
            "volume_type:collection".to_string()
        } else {
            filters.join(",")
        }
    }

    /// Fetch and unwrap the envelope, mapping ComicVine's own status codes
    async fn get_results<T>(&self, path: &str, query: QueryParams) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response: ComicVineResponse<serde_json::Value> = self
            .http_client
            .get_json(&format!("{}{}", self.base_url, path), query.as_slice())
            .await?;

        match response.status_code {
            STATUS_OK => serde_json::from_value(response.results).map_err(|e| {
                AppError::MappingError(format!("ComicVine results for {}: {}", path, e))
            }),
            STATUS_NOT_FOUND => Err(AppError::NotFound(format!(
                "ComicVine API: {} ({})",
                response.error, path
            ))),
            STATUS_INVALID_KEY => Err(AppError::Unauthorized(format!(
                "ComicVine API: {}",
                response.error
            ))),
            code => Err(AppError::ApiError(format!(
                "ComicVine API returned status {}: {}",
                code, response.error
            ))),
        }
    }
}

impl ComicVineAdapter {
    pub async fn try_popular(&self, limit: usize) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let query = self
            .authenticated_query()?
            .push("filter", "volume_type:collection")
            .push("sort", "date_last_updated:desc")
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push("field_list", LIST_FIELDS);
        log::info!("ComicVine: Getting popular volumes (limit: {})", limit);

        let volumes: Vec<Volume> = self.get_results("/volumes/", query).await?;
        Ok(volumes.iter().map(|v| self.mapper.map_volume(v)).collect())
    }

    pub async fn try_search(
        &self,
        criteria: &SearchCriteria,
        limit: usize,
    ) -> AppResult<Vec<CatalogEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let filter = Self::search_filter(criteria);
        let query = self
            .authenticated_query()?
            .push("filter", &filter)
            .push("limit", page_size(limit, MAX_PAGE_SIZE))
            .push("field_list", LIST_FIELDS);
        log::info!("ComicVine: Searching volumes with '{}' (limit: {})", filter, limit);

        let volumes: Vec<Volume> = self.get_results("/volumes/", query).await?;
        Ok(volumes.iter().map(|v| self.mapper.map_volume(v)).collect())
    }

    pub async fn try_detail(&self, id: &str) -> AppResult<Option<CatalogDetail>> {
        let query = self
            .authenticated_query()?
            .push("field_list", DETAIL_FIELDS);
        let id = id.trim().trim_start_matches("4050-");
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::ValidationError(format!(
                "Invalid ComicVine volume ID: {}",
                id
            )));
        }
        log::info!("ComicVine: Getting volume by ID '{}'", id);

        let volume: Volume = self
            .get_results(&format!("/volume/4050-{}/", id), query)
            .await?;
        Ok(Some(self.mapper.map_detail(&volume)))
    }
}

#[async_trait]
impl MangaSourceAdapter for ComicVineAdapter {
    fn source(&self) -> MangaSource {
        MangaSource::ComicVine
    }

    fn rate_limit_info(&self) -> RateLimiterInfo {
        RateLimiterInfo::from_interval(self.http_client.min_interval())
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter() {
        let criteria = SearchCriteria::by_title("Akira").with_year(1982);
        assert_eq!(
            ComicVineAdapter::search_filter(&criteria),
            "name:Akira,start_year:1982"
        );
        assert_eq!(
            ComicVineAdapter::search_filter(&SearchCriteria::default()),
            "volume_type:collection"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let config = CatalogConfig::default().without_pacing();
        let adapter = ComicVineAdapter::new(&config).unwrap();

        assert!(matches!(
            adapter.try_popular(5).await,
            Err(AppError::ConfigurationError(_))
        ));
        assert!(adapter.fetch_popular(5).await.is_empty());
    }
}
