//! Cache keys and freshness classes for aggregation results

use std::fmt;
use std::time::Duration;

use crate::modules::provider::domain::{MangaSource, SearchCriteria};

/// Key of one cached aggregation result. Every parameter that changes the
/// result is part of the rendered key.
#[derive(Debug, Clone, Copy)]
pub enum CacheKey<'a> {
    Latest { limit: usize },
    Popular { limit: usize },
    Search { criteria: &'a SearchCriteria, limit: usize },
    Details { source: MangaSource, id: &'a str },
    Chapters { source: MangaSource, manga_id: &'a str },
    Images { source: MangaSource, chapter_id: &'a str },
    Genre { genre: &'a str, limit: usize },
    Similar { source: MangaSource, manga_id: &'a str, limit: usize },
}

impl CacheKey<'_> {
    /// Time-to-live of the key's operation class
    pub fn ttl(&self) -> Duration {
        let secs = match self {
            CacheKey::Latest { .. } => 3600,
            CacheKey::Popular { .. } => 3600,
            CacheKey::Search { .. } => 1800,
            CacheKey::Details { .. } => 3600,
            CacheKey::Chapters { .. } => 1800,
            // Image hosts rotate URLs and tokens
            CacheKey::Images { .. } => 900,
            CacheKey::Genre { .. } => 3600,
            CacheKey::Similar { .. } => 3600,
        };
        Duration::from_secs(secs)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CacheKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Latest { limit } => write!(f, "latest:{}", limit),
            CacheKey::Popular { limit } => write!(f, "popular:{}", limit),
            CacheKey::Search { criteria, limit } => {
                write!(f, "search:{}:{}", criteria.fingerprint(), limit)
            }
            CacheKey::Details { source, id } => write!(f, "details:{}:{}", source, id),
            CacheKey::Chapters { source, manga_id } => {
                write!(f, "chapters:{}:{}", source, manga_id)
            }
            CacheKey::Images { source, chapter_id } => {
                write!(f, "images:{}:{}", source, chapter_id)
            }
            CacheKey::Genre { genre, limit } => {
                write!(f, "genre:{}:{}", genre.trim().to_lowercase(), limit)
            }
            CacheKey::Similar {
                source,
                manga_id,
                limit,
            } => write!(f, "similar:{}:{}:{}", source, manga_id, limit),
        }
    }
}
