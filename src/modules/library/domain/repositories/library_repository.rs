use async_trait::async_trait;

use crate::modules::library::domain::entities::{
    LibraryEntry, LibraryStatus, ReadingProgressRecord,
};
use crate::modules::provider::domain::MangaSource;
use crate::shared::errors::AppResult;

/// Persistence port for library membership and reading progress
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// Insert or replace the entry for (user, manga, source)
    async fn upsert_library_entry(&self, entry: LibraryEntry) -> AppResult<LibraryEntry>;

    /// Fails with `NotFound` when the manga is not in the user's library
    async fn update_library_status(
        &self,
        user_id: &str,
        manga_id: &str,
        source: MangaSource,
        status: LibraryStatus,
    ) -> AppResult<LibraryEntry>;

    /// Returns whether an entry was removed
    async fn remove_library_entry(
        &self,
        user_id: &str,
        manga_id: &str,
        source: MangaSource,
    ) -> AppResult<bool>;

    /// Newest first
    async fn list_library(&self, user_id: &str) -> AppResult<Vec<LibraryEntry>>;

    /// Insert or replace progress for (user, manga, chapter, source)
    async fn record_progress(&self, record: ReadingProgressRecord) -> AppResult<()>;

    /// Move the last page of existing progress; `Ok(false)` when none exists
    async fn update_last_page(
        &self,
        user_id: &str,
        manga_id: &str,
        chapter_id: &str,
        source: MangaSource,
        page: u32,
    ) -> AppResult<bool>;

    /// Most recently read chapter of one manga
    async fn latest_progress(
        &self,
        user_id: &str,
        manga_id: &str,
        source: MangaSource,
    ) -> AppResult<Option<ReadingProgressRecord>>;

    /// All progress of a user, most recent first
    async fn reading_history(
        &self,
        user_id: &str,
        offset: usize,
        limit: usize,
    ) -> AppResult<Vec<ReadingProgressRecord>>;
}
