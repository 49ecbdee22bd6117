pub mod cache_layer;
pub mod clock;
pub mod store;

pub use cache_layer::{CacheLayer, CacheStats};
pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CacheEntry, CacheStore, InMemoryCacheStore};
