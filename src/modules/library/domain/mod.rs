pub mod entities;
pub mod repositories;
pub mod services;

// Re-exports for easy access
pub use entities::{LibraryEntry, LibraryStatus, ReadingProgressRecord};
pub use repositories::LibraryRepository;
pub use services::{group_chapters_by_volume, VolumeGroup};
