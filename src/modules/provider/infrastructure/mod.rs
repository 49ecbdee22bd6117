pub mod adapters;
pub mod http_client;

// Re-export commonly used types
pub use adapters::AdapterRegistry;
pub use http_client::{RateLimitClient, RetryPolicy};
