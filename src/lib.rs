pub mod modules;
pub mod shared;

// Re-exports for easy external access
pub use modules::aggregation::{CacheLayer, MangaAggregator};
pub use modules::library::{InMemoryLibraryRepository, LibraryService, ReaderService};
pub use modules::provider::{
    AdapterRegistry, CatalogDetail, CatalogEntry, ChapterEntry, ChapterImage, MangaSource,
    MangaSourceAdapter, PublicationStatus, SearchCriteria,
};
pub use shared::{AppError, AppResult, CatalogConfig};
