pub mod cache;

pub use cache::{CacheLayer, CacheStats, Clock, InMemoryCacheStore, ManualClock, SystemClock};
