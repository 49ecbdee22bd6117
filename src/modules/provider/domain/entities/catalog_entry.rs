use serde::{Deserialize, Serialize};

use crate::modules::provider::domain::value_objects::{MangaSource, PublicationStatus};

/// Canonical summary form of a manga, shared by every source.
///
/// `(id, source)` identifies an entry. The same work listed by two sources
/// carries two unrelated ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub source: MangaSource,
    pub title: String,
    pub description: String,
    pub cover_image_url: Option<String>,
    pub authors: Vec<String>,
    pub status: PublicationStatus,
    pub genres: Vec<String>,
    pub year: Option<i32>,
    /// Native unit of the source (followers, members, favorites, votes or 0).
    /// Not comparable across sources.
    pub popularity_score: f64,
    pub score: Option<f64>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, source: MangaSource, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source,
            title: title.into(),
            description: String::new(),
            cover_image_url: None,
            authors: Vec::new(),
            status: PublicationStatus::Unknown,
            genres: Vec::new(),
            year: None,
            popularity_score: 0.0,
            score: None,
        }
    }

    pub fn with_popularity(mut self, popularity_score: f64) -> Self {
        self.popularity_score = popularity_score;
        self
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }
}

/// Lightweight pointer to another catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedReference {
    pub id: String,
    pub title: String,
    pub cover_image_url: Option<String>,
    pub source: MangaSource,
}

/// Full detail record for a single manga
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDetail {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    pub alt_titles: Vec<String>,
    pub artists: Vec<String>,
    pub content_rating: Option<String>,
    pub chapter_count: Option<u32>,
    pub volume_count: Option<u32>,
    pub related_recommendations: Vec<RelatedReference>,
}

impl CatalogDetail {
    pub fn from_entry(entry: CatalogEntry) -> Self {
        Self {
            entry,
            alt_titles: Vec::new(),
            artists: Vec::new(),
            content_rating: None,
            chapter_count: None,
            volume_count: None,
            related_recommendations: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.entry.id
    }

    pub fn title(&self) -> &str {
        &self.entry.title
    }

    pub fn genres(&self) -> &[String] {
        &self.entry.genres
    }
}
