pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{LibraryItemView, LibraryService, ReaderService, ReaderView};
pub use domain::{
    group_chapters_by_volume, LibraryEntry, LibraryRepository, LibraryStatus,
    ReadingProgressRecord, VolumeGroup,
};
pub use infrastructure::InMemoryLibraryRepository;
