//! Paced HTTP client shared by the source adapters
//!
//! Each adapter owns one client. The governor limiter serializes callers of
//! the same upstream while leaving other upstreams untouched.

use super::retry_policy::{is_retryable_error, is_retryable_status, RetryHint, RetryPolicy};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tokio::time::sleep;

const USER_AGENT_VALUE: &str = "manga-hub/0.1 (+https://github.com/manga-hub/manga-hub)";
const BODY_EXCERPT_CHARS: usize = 200;

pub struct RateLimitClient {
    client: Client,
    /// `None` when the source is unpaced
    rate_limiter: Option<DefaultDirectRateLimiter>,
    min_interval: Duration,
    retry_policy: RetryPolicy,
    provider_name: String,
}

impl RateLimitClient {
    /// Create a client that waits at least `min_interval` between requests
    pub fn new(
        provider_name: &str,
        min_interval: Duration,
        request_timeout: Duration,
        retry_policy: RetryPolicy,
        mut headers: HeaderMap,
    ) -> AppResult<Self> {
        headers
            .entry(USER_AGENT)
            .or_insert(HeaderValue::from_static(USER_AGENT_VALUE));
        headers
            .entry(ACCEPT)
            .or_insert(HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AppError::ConfigurationError(format!(
                    "Failed to build {} HTTP client: {}",
                    provider_name, e
                ))
            })?;

        Ok(Self {
            client,
            rate_limiter: Self::create_rate_limiter(min_interval),
            min_interval,
            retry_policy,
            provider_name: provider_name.to_string(),
        })
    }

    /// One request per `min_interval`, no burst
    fn create_rate_limiter(min_interval: Duration) -> Option<DefaultDirectRateLimiter> {
        Quota::with_period(min_interval)
            .map(|quota| GovernorRateLimiter::direct(quota.allow_burst(NonZeroU32::MIN)))
    }

    /// GET `url` with query pairs and decode the JSON body
    pub async fn get_json<T>(&self, url: &str, query: &[(String, String)]) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send_with_retries(url, query).await?;
        self.parse_response(response).await
    }

    /// Send with pacing and automatic retries of 429/5xx and transient transport errors
    async fn send_with_retries(&self, url: &str, query: &[(String, String)]) -> AppResult<Response> {
        let attempts = self.retry_policy.max_retries + 1;

        for attempt in 0..attempts {
            // Wait for rate limiter before attempting request
            if let Some(limiter) = &self.rate_limiter {
                limiter.until_ready().await;
            }

            LogContext::api_call(&self.provider_name, url, "GET", None);
            let started = Instant::now();
            let is_last = attempt + 1 == attempts;

            match self.client.get(url).query(query).send().await {
                Ok(response) => {
                    let status = response.status();
                    LogContext::api_call(
                        &self.provider_name,
                        url,
                        status.as_str(),
                        Some(started.elapsed().as_millis() as u64),
                    );

                    if status.is_success() {
                        return Ok(response);
                    }

                    if is_retryable_status(status) && !is_last {
                        let hint = RetryHint::from_headers(response.headers());
                        let delay = self.retry_policy.delay_for(attempt, hint.delay());
                        log::warn!(
                            "{} API returned {} (attempt {}/{}). Retrying in {:?}",
                            self.provider_name,
                            status,
                            attempt + 1,
                            attempts,
                            delay
                        );
                        sleep(delay).await;
                        continue;
                    }

                    return Err(self.status_error(status, response).await);
                }
                Err(e) => {
                    if is_retryable_error(&e) && !is_last {
                        let delay = self.retry_policy.delay_for(attempt, None);
                        log::warn!(
                            "{} API request failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.provider_name,
                            attempt + 1,
                            attempts,
                            e,
                            delay
                        );
                        sleep(delay).await;
                        continue;
                    }

                    return Err(AppError::from(e).from_source(&self.provider_name));
                }
            }
        }

        // Only reachable when the loop body never ran
        Err(AppError::InternalError(format!(
            "{} request loop made no attempts",
            self.provider_name
        )))
    }

    /// Turn a non-success response into a classified error
    async fn status_error(&self, status: StatusCode, response: Response) -> AppError {
        let body = response.text().await.unwrap_or_default();
        let message = format!(
            "{} API returned {}: {}",
            self.provider_name,
            status,
            excerpt(&body)
        );

        match status {
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(message),
            StatusCode::TOO_MANY_REQUESTS => AppError::RateLimitError(message),
            _ => AppError::ApiError(message),
        }
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.provider_name, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.provider_name,
                e,
                excerpt(&response_text)
            ))
        })
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter
            .as_ref()
            .map_or(true, |limiter| limiter.check().is_ok())
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Get provider name
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}

fn excerpt(body: &str) -> String {
    if body.chars().count() > BODY_EXCERPT_CHARS {
        let head: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
