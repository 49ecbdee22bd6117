//! Retry policies for upstream manga catalogs
//!
//! A policy decides how often a failed request is repeated and how long the
//! client sleeps in between. Server hints (`Retry-After`, `X-RateLimit-Reset`)
//! take precedence over the computed backoff but never exceed the ceiling.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// How the wait grows between attempts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    Fixed,
    Exponential { factor: f64 },
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    /// Upper bound for any wait, server hints included
    pub ceiling: Duration,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn standard() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            ceiling: Duration::from_secs(30),
            backoff: Backoff::Exponential { factor: 2.0 },
        }
    }

    /// Jikan answers bursts with 429s, so it gets longer waits
    pub fn jikan() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(2),
            ceiling: Duration::from_secs(120),
            backoff: Backoff::Exponential { factor: 2.0 },
        }
    }

    /// Fail on the first error
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            ceiling: Duration::ZERO,
            backoff: Backoff::Fixed,
        }
    }

    /// Wait before retry number `attempt` (zero based)
    pub fn delay_for(&self, attempt: u32, hint: Option<Duration>) -> Duration {
        let delay = match (hint, self.backoff) {
            (Some(server_delay), _) => server_delay,
            (None, Backoff::Fixed) => self.base_delay,
            (None, Backoff::Exponential { factor }) => {
                self.base_delay.mul_f64(factor.powi(attempt.min(16) as i32))
            }
        };
        delay.min(self.ceiling)
    }
}

/// Wait hints a throttled response carries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetryHint {
    pub retry_after: Option<Duration>,
    /// Time left until the window resets, from `X-RateLimit-Reset`
    pub reset_in: Option<Duration>,
}

impl RetryHint {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header_u64 = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
        };

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            retry_after: header_u64("retry-after").map(Duration::from_secs),
            reset_in: header_u64("x-ratelimit-reset")
                .map(|reset_at| Duration::from_secs(reset_at.saturating_sub(now))),
        }
    }

    pub fn delay(&self) -> Option<Duration> {
        self.retry_after.or(self.reset_in)
    }
}

/// 429, 408, 425 and every 5xx are worth another attempt
pub fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 425 | 429 | 500..=599)
}

/// Transport failures are retried only when the request never got an answer
pub fn is_retryable_error(error: &reqwest::Error) -> bool {
    match error.status() {
        Some(status) => is_retryable_status(status),
        None => error.is_timeout() || error.is_connect(),
    }
}
