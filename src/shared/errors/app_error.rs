use serde::Serialize;
use thiserror::Error;

/// Errors raised inside the crate. Adapters absorb the upstream group and
/// report an empty result; the rest reaches the caller.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    // Upstream catalog failures
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Mapping error: {0}")]
    MappingError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    // Caller or setup mistakes
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // Local
    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::ApiError(_)
                | AppError::NotFound(_)
                | AppError::Unauthorized(_)
                | AppError::RateLimitError(_)
                | AppError::SerializationError(_)
                | AppError::MappingError(_)
                | AppError::ExternalServiceError(_)
                | AppError::Timeout(_)
        )
    }

    /// Prefix transport failures with the catalog that produced them
    pub fn from_source(self, source: &str) -> Self {
        match self {
            AppError::Timeout(msg) => AppError::Timeout(format!("{}: {}", source, msg)),
            AppError::ExternalServiceError(msg) => {
                AppError::ExternalServiceError(format!("{}: {}", source, msg))
            }
            other => other,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return AppError::Timeout("request timed out".to_string());
        }
        if err.is_connect() {
            return AppError::ExternalServiceError("connection failed".to_string());
        }

        match err.status().map(|status| status.as_u16()) {
            Some(404) => AppError::NotFound(err.to_string()),
            Some(401 | 403) => AppError::Unauthorized(err.to_string()),
            Some(429) => AppError::RateLimitError(err.to_string()),
            _ => AppError::ApiError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(AppError::NotFound("x".into()).is_upstream());
        assert!(AppError::Timeout("x".into()).is_upstream());
        assert!(!AppError::ConfigurationError("x".into()).is_upstream());
        assert!(!AppError::ValidationError("x".into()).is_upstream());
        assert!(!AppError::CacheError("x".into()).is_upstream());
    }

    #[test]
    fn test_serializes_with_tag() {
        let json = serde_json::to_value(AppError::NotFound("manga 42".into())).unwrap();
        assert_eq!(json["type"], "NotFound");
        assert_eq!(json["message"], "manga 42");
    }

    #[test]
    fn test_from_source_prefixes_transport_errors() {
        let err = AppError::Timeout("request timed out".into()).from_source("Jikan");
        assert_eq!(err.to_string(), "Timeout: Jikan: request timed out");

        let untouched = AppError::NotFound("gone".into()).from_source("Jikan");
        assert_eq!(untouched.to_string(), "Not found: gone");
    }
}
