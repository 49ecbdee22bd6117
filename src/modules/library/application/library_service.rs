use serde::Serialize;
use std::sync::Arc;

use crate::modules::aggregation::MangaAggregator;
use crate::modules::library::domain::{
    LibraryEntry, LibraryRepository, LibraryStatus, ReadingProgressRecord,
};
use crate::modules::provider::domain::{CatalogDetail, MangaSource};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

const HISTORY_PAGE_SIZE: usize = 20;

/// One library row with fresh catalog data and the latest progress
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItemView {
    pub manga: CatalogDetail,
    pub library_status: LibraryStatus,
    pub reading_progress: Option<ReadingProgressRecord>,
}

pub struct LibraryService {
    aggregator: Arc<MangaAggregator>,
    repository: Arc<dyn LibraryRepository>,
}

impl LibraryService {
    pub fn new(aggregator: Arc<MangaAggregator>, repository: Arc<dyn LibraryRepository>) -> Self {
        Self {
            aggregator,
            repository,
        }
    }

    /// Add or re-file a manga; title and cover come from the catalog
    pub async fn add_to_library(
        &self,
        user_id: &str,
        manga_id: &str,
        source: &str,
        status: LibraryStatus,
    ) -> AppResult<LibraryEntry> {
        Validator::validate_identifier("user_id", user_id)?;
        Validator::validate_identifier("manga_id", manga_id)?;

        let detail = self
            .aggregator
            .get_manga_details(manga_id, source)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Manga {} ({}) not found", manga_id, source))
            })?;

        let entry = LibraryEntry::new(
            user_id,
            manga_id,
            detail.entry.source,
            detail.title(),
            status,
        )
        .with_cover(detail.entry.cover_image_url.clone());

        let saved = self.repository.upsert_library_entry(entry).await?;
        log::info!(
            "Library: {} filed '{}' as {}",
            user_id,
            saved.manga_title,
            saved.status
        );
        Ok(saved)
    }

    pub async fn update_status(
        &self,
        user_id: &str,
        manga_id: &str,
        source: &str,
        status: LibraryStatus,
    ) -> AppResult<LibraryEntry> {
        self.repository
            .update_library_status(
                user_id,
                manga_id,
                MangaSource::from_name_or_primary(source),
                status,
            )
            .await
    }

    pub async fn remove(&self, user_id: &str, manga_id: &str, source: &str) -> AppResult<bool> {
        self.repository
            .remove_library_entry(user_id, manga_id, MangaSource::from_name_or_primary(source))
            .await
    }

    /// Library rows whose manga the catalog still knows, newest first
    pub async fn library_overview(&self, user_id: &str) -> AppResult<Vec<LibraryItemView>> {
        let entries = self.repository.list_library(user_id).await?;
        let mut items = Vec::with_capacity(entries.len());

        for entry in entries {
            let Some(manga) = self
                .aggregator
                .get_manga_details(&entry.manga_id, entry.source.as_str())
                .await?
            else {
                log::warn!(
                    "Library: '{}' ({}) no longer resolves, skipping",
                    entry.manga_id,
                    entry.source
                );
                continue;
            };

            let reading_progress = self
                .repository
                .latest_progress(user_id, &entry.manga_id, entry.source)
                .await?;

            items.push(LibraryItemView {
                manga,
                library_status: entry.status,
                reading_progress,
            });
        }

        Ok(items)
    }

    /// One page (1-based) of reading history, most recent first
    pub async fn history(&self, user_id: &str, page: u32) -> AppResult<Vec<ReadingProgressRecord>> {
        Validator::validate_page(page)?;
        let offset = (page as usize - 1) * HISTORY_PAGE_SIZE;
        self.repository
            .reading_history(user_id, offset, HISTORY_PAGE_SIZE)
            .await
    }
}
