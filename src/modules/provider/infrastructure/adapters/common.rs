//! Behavior shared by every source adapter: client construction, credential
//! checks, query building and the error boundary.

use reqwest::header::HeaderMap;

use crate::modules::provider::domain::MangaSource;
use crate::modules::provider::infrastructure::http_client::{RateLimitClient, RetryPolicy};
use crate::shared::config::CatalogConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;

/// Build the paced client for one source from the catalog configuration
pub fn client_for(
    config: &CatalogConfig,
    source: MangaSource,
    retry_policy: RetryPolicy,
    headers: HeaderMap,
) -> AppResult<RateLimitClient> {
    let retry_policy = if config.retry_upstream_failures {
        retry_policy
    } else {
        RetryPolicy::none()
    };

    RateLimitClient::new(
        display_name(source),
        config.endpoint(source).min_interval,
        config.request_timeout,
        retry_policy,
        headers,
    )
}

pub fn display_name(source: MangaSource) -> &'static str {
    match source {
        MangaSource::MangaDex => "MangaDex",
        MangaSource::MyAnimeList => "MyAnimeList",
        MangaSource::Kitsu => "Kitsu",
        MangaSource::Jikan => "Jikan",
        MangaSource::ComicVine => "ComicVine",
    }
}

/// Return the credential or a configuration error when it is missing or blank
pub fn require_credential(
    source: MangaSource,
    name: &str,
    credential: Option<&str>,
) -> AppResult<String> {
    credential
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::ConfigurationError(format!(
                "{} API: No {} configured",
                display_name(source),
                name
            ))
        })
}

/// Ordered query pairs; repeated keys are allowed (`includes[]`)
#[derive(Debug, Default, Clone)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn push_all<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self = self.push(key, value);
        }
        self
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Reduce a list operation's outcome to the adapter contract: errors become
/// an empty list after being logged
pub fn absorb_list<T>(source: MangaSource, operation: &str, result: AppResult<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(AppError::ConfigurationError(msg)) => {
            LogContext::source_unavailable(display_name(source), operation, &msg);
            Vec::new()
        }
        Err(e) if !e.is_upstream() => {
            log::warn!("{} {} rejected: {}", display_name(source), operation, e);
            Vec::new()
        }
        Err(e) => {
            LogContext::upstream_failure(display_name(source), operation, &e);
            Vec::new()
        }
    }
}

/// Reduce a detail operation's outcome to found / not found
pub fn absorb_detail<T>(
    source: MangaSource,
    operation: &str,
    id: &str,
    result: AppResult<Option<T>>,
) -> Option<T> {
    match result {
        Ok(found) => found,
        Err(AppError::NotFound(_)) => {
            log::info!("{}: No manga found for ID '{}'", display_name(source), id);
            None
        }
        Err(AppError::ConfigurationError(msg)) => {
            LogContext::source_unavailable(display_name(source), operation, &msg);
            None
        }
        Err(e) if !e.is_upstream() => {
            log::warn!(
                "{} {} rejected ID '{}': {}",
                display_name(source),
                operation,
                id,
                e
            );
            None
        }
        Err(e) => {
            let operation = format!("{} '{}'", operation, id);
            LogContext::upstream_failure(display_name(source), &operation, &e);
            None
        }
    }
}

/// Clamp a requested page size to what the upstream accepts
pub fn page_size(limit: usize, max: usize) -> usize {
    limit.clamp(1, max)
}
