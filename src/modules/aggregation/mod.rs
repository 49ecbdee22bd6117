pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::MangaAggregator;
pub use domain::CacheKey;
pub use infrastructure::{CacheLayer, CacheStats, Clock, InMemoryCacheStore, ManualClock, SystemClock};
