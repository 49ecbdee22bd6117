pub mod library_entry;
pub mod reading_progress;

pub use library_entry::{LibraryEntry, LibraryStatus};
pub use reading_progress::ReadingProgressRecord;
