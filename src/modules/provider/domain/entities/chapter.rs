use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::provider::domain::value_objects::MangaSource;

pub const UNKNOWN_MANGA_TITLE: &str = "Unknown Manga";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterEntry {
    pub id: String,
    pub manga_id: String,
    pub manga_title: String,
    /// Volume labels are not always numeric ("1", "2.5", "Extra")
    pub volume: Option<String>,
    pub chapter_number: Option<String>,
    pub title: String,
    pub language: String,
    pub page_count: u32,
    pub published_at: Option<DateTime<Utc>>,
    pub source: MangaSource,
}

impl ChapterEntry {
    pub fn new(id: impl Into<String>, manga_id: impl Into<String>, source: MangaSource) -> Self {
        Self {
            id: id.into(),
            manga_id: manga_id.into(),
            manga_title: UNKNOWN_MANGA_TITLE.to_string(),
            volume: None,
            chapter_number: None,
            title: String::new(),
            language: "en".to_string(),
            page_count: 0,
            published_at: None,
            source,
        }
    }

    pub fn numbered(mut self, volume: Option<&str>, chapter_number: Option<&str>) -> Self {
        self.volume = volume.map(str::to_string);
        self.chapter_number = chapter_number.map(str::to_string);
        self
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Fallback title used when a chapter has no title of its own
pub fn default_chapter_title(chapter_number: Option<&str>) -> String {
    format!("Chapter {}", chapter_number.unwrap_or("?"))
}

/// One page of a chapter. `index` is 1-based and contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterImage {
    pub index: u32,
    pub url: String,
}

impl ChapterImage {
    /// Number a list of page URLs starting at 1
    pub fn sequence<I>(urls: I) -> Vec<ChapterImage>
    where
        I: IntoIterator<Item = String>,
    {
        urls.into_iter()
            .enumerate()
            .map(|(i, url)| ChapterImage {
                index: i as u32 + 1,
                url,
            })
            .collect()
    }
}
