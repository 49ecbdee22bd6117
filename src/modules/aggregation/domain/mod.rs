pub mod cache_key;
pub mod merge;

pub use cache_key::CacheKey;
