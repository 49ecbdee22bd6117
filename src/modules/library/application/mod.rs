pub mod library_service;
pub mod reader_service;

pub use library_service::{LibraryItemView, LibraryService};
pub use reader_service::{ReaderService, ReaderView};
