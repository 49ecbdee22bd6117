//! Manga source enum and name parsing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

/// Supported upstream manga catalogs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MangaSource {
    /// MangaDex - primary source, the only one serving chapter images
    #[serde(rename = "mangadex")]
    MangaDex,
    /// MyAnimeList official API (client id required)
    #[serde(rename = "myanimelist")]
    MyAnimeList,
    /// Kitsu JSON:API
    #[serde(rename = "kitsu")]
    Kitsu,
    /// Jikan (unofficial MyAnimeList API)
    #[serde(rename = "jikan")]
    Jikan,
    /// ComicVine (api key required)
    #[serde(rename = "comicvine")]
    ComicVine,
}

impl MangaSource {
    pub const ALL: [MangaSource; 5] = [
        MangaSource::MangaDex,
        MangaSource::MyAnimeList,
        MangaSource::Kitsu,
        MangaSource::Jikan,
        MangaSource::ComicVine,
    ];

    /// Source used when a caller names nothing we recognize
    pub fn primary() -> Self {
        Self::MangaDex
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MangaSource::MangaDex => "mangadex",
            MangaSource::MyAnimeList => "myanimelist",
            MangaSource::Kitsu => "kitsu",
            MangaSource::Jikan => "jikan",
            MangaSource::ComicVine => "comicvine",
        }
    }

    /// Case-insensitive lookup by wire name
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(name))
    }

    /// Resolve a caller-supplied source name, falling back to the primary source
    pub fn from_name_or_primary(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            log::warn!(
                "Unknown manga source '{}', falling back to {}",
                name,
                Self::primary()
            );
            Self::primary()
        })
    }
}

impl fmt::Display for MangaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MangaSource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AppError::InvalidInput(format!("Unknown manga source: {}", s)))
    }
}
