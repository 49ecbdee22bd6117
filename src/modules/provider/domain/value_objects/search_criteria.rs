use serde::{Deserialize, Serialize};

use super::PublicationStatus;

/// Structured search criteria for catalog queries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub status: Option<PublicationStatus>,
    pub year: Option<i32>,
}

/// Normalized form used for cache fingerprints
#[derive(Serialize)]
struct FingerprintView<'a> {
    title: Option<&'a str>,
    author: Option<&'a str>,
    genres: Vec<String>,
    status: Option<PublicationStatus>,
    year: Option<i32>,
}

impl SearchCriteria {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    pub fn with_status(mut self, status: PublicationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Non-blank title term, trimmed
    pub fn title_term(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }

    pub fn author_term(&self) -> Option<&str> {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|author| !author.is_empty())
    }

    /// Copy that keeps only the title term
    pub fn title_only(&self) -> Self {
        Self {
            title: self.title_term().map(str::to_string),
            ..Self::default()
        }
    }

    /// Deterministic digest of every field that affects results.
    ///
    /// Genres are lowercased, sorted and deduplicated; text terms are trimmed,
    /// so equivalent criteria share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut genres: Vec<String> = self
            .genres
            .iter()
            .map(|genre| genre.trim().to_lowercase())
            .filter(|genre| !genre.is_empty())
            .collect();
        genres.sort();
        genres.dedup();

        let view = FingerprintView {
            title: self.title_term(),
            author: self.author_term(),
            genres,
            status: self.status,
            year: self.year,
        };

        // Serializing a struct of plain fields cannot fail
        let canonical = serde_json::to_vec(&view).unwrap_or_default();
        blake3::hash(&canonical).to_hex().to_string()
    }
}
