//! Catalog configuration loaded from the process environment.
//!
//! Credentials are opaque strings. An empty credential is treated the same as
//! a missing one, so adapters that need it degrade to empty results.

use crate::modules::provider::MangaSource;
use crate::shared::errors::{AppError, AppResult};
use std::time::Duration;

/// Base URL and pacing for one upstream catalog
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEndpoint {
    pub base_url: String,
    /// Minimum interval between two calls to this upstream
    pub min_interval: Duration,
}

impl SourceEndpoint {
    pub fn new(base_url: &str, min_interval: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            min_interval,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Preferred language for localized titles and chapter listings
    pub locale: String,
    pub myanimelist_client_id: Option<String>,
    pub comicvine_api_key: Option<String>,
    /// Upper bound for a single adapter call inside an aggregation
    pub adapter_timeout: Duration,
    /// reqwest timeout for a single HTTP round trip
    pub request_timeout: Duration,
    pub cache_max_entries: usize,
    /// When false, 429/5xx responses fail immediately instead of being retried
    pub retry_upstream_failures: bool,
    pub mangadex: SourceEndpoint,
    pub myanimelist: SourceEndpoint,
    pub kitsu: SourceEndpoint,
    pub jikan: SourceEndpoint,
    pub comicvine: SourceEndpoint,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            myanimelist_client_id: None,
            comicvine_api_key: None,
            adapter_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            cache_max_entries: 2000,
            retry_upstream_failures: true,
            mangadex: SourceEndpoint::new("https://api.mangadex.org", Duration::from_secs(1)),
            myanimelist: SourceEndpoint::new(
                "https://api.myanimelist.net/v2",
                Duration::from_millis(500),
            ),
            kitsu: SourceEndpoint::new("https://kitsu.io/api/edge", Duration::from_millis(500)),
            jikan: SourceEndpoint::new("https://api.jikan.moe/v4", Duration::from_secs(2)),
            comicvine: SourceEndpoint::new(
                "https://comicvine.gamespot.com/api",
                Duration::from_secs(1),
            ),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables (and `.env` when present)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        config.myanimelist_client_id = non_empty_var("MYANIMELIST_CLIENT_ID");
        config.comicvine_api_key = non_empty_var("COMICVINE_API_KEY");

        if let Some(locale) = non_empty_var("MANGA_HUB_LOCALE") {
            config.locale = locale;
        }

        if let Some(raw) = non_empty_var("MANGA_HUB_ADAPTER_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                AppError::ConfigurationError(format!(
                    "MANGA_HUB_ADAPTER_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?;
            config.adapter_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = non_empty_var("MANGA_HUB_CACHE_MAX_ENTRIES") {
            config.cache_max_entries = raw.parse().map_err(|_| {
                AppError::ConfigurationError(format!(
                    "MANGA_HUB_CACHE_MAX_ENTRIES must be a positive integer, got '{}'",
                    raw
                ))
            })?;
        }

        for source in MangaSource::ALL {
            if let Some(url) = non_empty_var(base_url_var(source)) {
                config.endpoint_mut(source).base_url = url.trim_end_matches('/').to_string();
            }
        }

        log::info!(
            "Config: locale={}, adapter timeout={:?}, MAL credentials={}, ComicVine credentials={}",
            config.locale,
            config.adapter_timeout,
            config.myanimelist_client_id.is_some(),
            config.comicvine_api_key.is_some()
        );

        Ok(config)
    }

    pub fn endpoint(&self, source: MangaSource) -> &SourceEndpoint {
        match source {
            MangaSource::MangaDex => &self.mangadex,
            MangaSource::MyAnimeList => &self.myanimelist,
            MangaSource::Kitsu => &self.kitsu,
            MangaSource::Jikan => &self.jikan,
            MangaSource::ComicVine => &self.comicvine,
        }
    }

    pub fn endpoint_mut(&mut self, source: MangaSource) -> &mut SourceEndpoint {
        match source {
            MangaSource::MangaDex => &mut self.mangadex,
            MangaSource::MyAnimeList => &mut self.myanimelist,
            MangaSource::Kitsu => &mut self.kitsu,
            MangaSource::Jikan => &mut self.jikan,
            MangaSource::ComicVine => &mut self.comicvine,
        }
    }

    /// Point one source at a different base URL (stub servers in tests)
    pub fn with_base_url(mut self, source: MangaSource, base_url: &str) -> Self {
        self.endpoint_mut(source).base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Remove the per-source pacing
    pub fn without_pacing(mut self) -> Self {
        for source in MangaSource::ALL {
            self.endpoint_mut(source).min_interval = Duration::ZERO;
        }
        self
    }

    pub fn without_retries(mut self) -> Self {
        self.retry_upstream_failures = false;
        self
    }
}

fn base_url_var(source: MangaSource) -> &'static str {
    match source {
        MangaSource::MangaDex => "MANGADEX_BASE_URL",
        MangaSource::MyAnimeList => "MYANIMELIST_BASE_URL",
        MangaSource::Kitsu => "KITSU_BASE_URL",
        MangaSource::Jikan => "JIKAN_BASE_URL",
        MangaSource::ComicVine => "COMICVINE_BASE_URL",
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing() {
        let config = CatalogConfig::default();
        assert_eq!(config.jikan.min_interval, Duration::from_secs(2));
        assert_eq!(config.mangadex.min_interval, Duration::from_secs(1));
        assert_eq!(config.kitsu.min_interval, Duration::from_millis(500));
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn test_builders() {
        let config = CatalogConfig::default()
            .with_base_url(MangaSource::Kitsu, "http://127.0.0.1:9000/")
            .without_pacing()
            .without_retries();

        assert_eq!(
            config.endpoint(MangaSource::Kitsu).base_url,
            "http://127.0.0.1:9000"
        );
        assert!(MangaSource::ALL
            .iter()
            .all(|s| config.endpoint(*s).min_interval.is_zero()));
        assert!(!config.retry_upstream_failures);
    }
}
