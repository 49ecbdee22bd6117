use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::provider::domain::MangaSource;

/// Last position reached in one chapter, keyed by (user, manga, chapter, source)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgressRecord {
    pub user_id: String,
    pub manga_id: String,
    pub chapter_id: String,
    pub source: MangaSource,
    pub manga_title: String,
    pub chapter_number: Option<String>,
    pub chapter_title: Option<String>,
    pub last_page: u32,
    pub total_pages: u32,
    pub read_at: DateTime<Utc>,
}
