use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::modules::aggregation::MangaAggregator;
use crate::modules::library::domain::{LibraryRepository, ReadingProgressRecord};
use crate::modules::provider::domain::{CatalogDetail, ChapterEntry, ChapterImage, MangaSource};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// Everything needed to render one chapter
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderView {
    pub manga: CatalogDetail,
    pub chapter: ChapterEntry,
    /// Empty when the source serves no pages
    pub images: Vec<ChapterImage>,
    pub prev_chapter: Option<ChapterEntry>,
    pub next_chapter: Option<ChapterEntry>,
}

pub struct ReaderService {
    aggregator: Arc<MangaAggregator>,
    repository: Arc<dyn LibraryRepository>,
}

impl ReaderService {
    pub fn new(aggregator: Arc<MangaAggregator>, repository: Arc<dyn LibraryRepository>) -> Self {
        Self {
            aggregator,
            repository,
        }
    }

    /// Assemble the reader for one chapter. `None` when the chapter is not in
    /// the manga's chapter list or the manga itself is unknown. Opening a
    /// chapter as a user resets that chapter's progress to page 1.
    pub async fn open_chapter(
        &self,
        user_id: Option<&str>,
        manga_id: &str,
        chapter_id: &str,
        source: &str,
    ) -> AppResult<Option<ReaderView>> {
        Validator::validate_identifier("manga_id", manga_id)?;
        Validator::validate_identifier("chapter_id", chapter_id)?;

        let chapters = self.aggregator.get_manga_chapters(manga_id, source).await?;
        let Some(position) = chapters.iter().position(|c| c.id == chapter_id) else {
            log::info!(
                "Chapter '{}' not listed for manga '{}' ({})",
                chapter_id,
                manga_id,
                source
            );
            return Ok(None);
        };

        let Some(manga) = self.aggregator.get_manga_details(manga_id, source).await? else {
            log::info!("Manga '{}' ({}) not found", manga_id, source);
            return Ok(None);
        };

        let images = self.aggregator.get_chapter_images(chapter_id, source).await?;

        let chapter = chapters[position].clone();
        let prev_chapter = position
            .checked_sub(1)
            .and_then(|index| chapters.get(index))
            .cloned();
        let next_chapter = chapters.get(position + 1).cloned();

        if let Some(user_id) = user_id {
            self.repository
                .record_progress(ReadingProgressRecord {
                    user_id: user_id.to_string(),
                    manga_id: manga_id.to_string(),
                    chapter_id: chapter_id.to_string(),
                    source: MangaSource::from_name_or_primary(source),
                    manga_title: manga.title().to_string(),
                    chapter_number: chapter.chapter_number.clone(),
                    chapter_title: Some(chapter.title.clone()),
                    last_page: 1,
                    total_pages: images.len() as u32,
                    read_at: Utc::now(),
                })
                .await?;
        }

        Ok(Some(ReaderView {
            manga,
            chapter,
            images,
            prev_chapter,
            next_chapter,
        }))
    }

    /// Move the user's last page in a chapter already opened. `Ok(false)`
    /// when there is no progress to update.
    pub async fn update_progress(
        &self,
        user_id: &str,
        manga_id: &str,
        chapter_id: &str,
        source: &str,
        page: u32,
    ) -> AppResult<bool> {
        Validator::validate_page(page)?;
        self.repository
            .update_last_page(
                user_id,
                manga_id,
                chapter_id,
                MangaSource::from_name_or_primary(source),
                page,
            )
            .await
    }
}
