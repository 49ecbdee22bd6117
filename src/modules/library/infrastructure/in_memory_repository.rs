use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::modules::library::domain::{
    LibraryEntry, LibraryRepository, LibraryStatus, ReadingProgressRecord,
};
use crate::modules::provider::domain::MangaSource;
use crate::shared::errors::{AppError, AppResult};

type LibraryKey = (String, String, MangaSource);
type ProgressKey = (String, String, String, MangaSource);

/// Process-local library storage
#[derive(Debug, Default)]
pub struct InMemoryLibraryRepository {
    library: DashMap<LibraryKey, LibraryEntry>,
    progress: DashMap<ProgressKey, ReadingProgressRecord>,
}

impl InMemoryLibraryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn library_key(user_id: &str, manga_id: &str, source: MangaSource) -> LibraryKey {
        (user_id.to_string(), manga_id.to_string(), source)
    }

    fn progress_key(
        user_id: &str,
        manga_id: &str,
        chapter_id: &str,
        source: MangaSource,
    ) -> ProgressKey {
        (
            user_id.to_string(),
            manga_id.to_string(),
            chapter_id.to_string(),
            source,
        )
    }

    fn user_progress(&self, user_id: &str) -> Vec<ReadingProgressRecord> {
        let mut records: Vec<_> = self
            .progress
            .iter()
            .filter(|record| record.user_id == user_id)
            .map(|record| record.value().clone())
            .collect();
        records.sort_by(|a, b| b.read_at.cmp(&a.read_at));
        records
    }
}

#[async_trait]
impl LibraryRepository for InMemoryLibraryRepository {
    async fn upsert_library_entry(&self, mut entry: LibraryEntry) -> AppResult<LibraryEntry> {
        let key = Self::library_key(&entry.user_id, &entry.manga_id, entry.source);
        if let Some(existing) = self.library.get(&key) {
            entry.created_at = existing.created_at;
            entry.updated_at = Utc::now();
        }
        self.library.insert(key, entry.clone());
        Ok(entry)
    }

    async fn update_library_status(
        &self,
        user_id: &str,
        manga_id: &str,
        source: MangaSource,
        status: LibraryStatus,
    ) -> AppResult<LibraryEntry> {
        let key = Self::library_key(user_id, manga_id, source);
        let mut entry = self.library.get_mut(&key).ok_or_else(|| {
            AppError::NotFound(format!(
                "Manga {} ({}) not found in library",
                manga_id, source
            ))
        })?;
        entry.update_status(status);
        Ok(entry.clone())
    }

    async fn remove_library_entry(
        &self,
        user_id: &str,
        manga_id: &str,
        source: MangaSource,
    ) -> AppResult<bool> {
        Ok(self
            .library
            .remove(&Self::library_key(user_id, manga_id, source))
            .is_some())
    }

    async fn list_library(&self, user_id: &str) -> AppResult<Vec<LibraryEntry>> {
        let mut entries: Vec<_> = self
            .library
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn record_progress(&self, record: ReadingProgressRecord) -> AppResult<()> {
        let key = Self::progress_key(
            &record.user_id,
            &record.manga_id,
            &record.chapter_id,
            record.source,
        );
        self.progress.insert(key, record);
        Ok(())
    }

    async fn update_last_page(
        &self,
        user_id: &str,
        manga_id: &str,
        chapter_id: &str,
        source: MangaSource,
        page: u32,
    ) -> AppResult<bool> {
        let key = Self::progress_key(user_id, manga_id, chapter_id, source);
        match self.progress.get_mut(&key) {
            Some(mut record) => {
                record.last_page = page;
                record.read_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn latest_progress(
        &self,
        user_id: &str,
        manga_id: &str,
        source: MangaSource,
    ) -> AppResult<Option<ReadingProgressRecord>> {
        Ok(self
            .user_progress(user_id)
            .into_iter()
            .find(|record| record.manga_id == manga_id && record.source == source))
    }

    async fn reading_history(
        &self,
        user_id: &str,
        offset: usize,
        limit: usize,
    ) -> AppResult<Vec<ReadingProgressRecord>> {
        Ok(self
            .user_progress(user_id)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }
}
