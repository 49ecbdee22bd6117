pub mod domain;
pub mod infrastructure;
pub mod traits;

pub use domain::{
    CatalogDetail, CatalogEntry, ChapterEntry, ChapterImage, MangaSource, PublicationStatus,
    SearchCriteria,
};
pub use infrastructure::AdapterRegistry;
pub use traits::{MangaSourceAdapter, RateLimiterInfo};
