use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::modules::provider::domain::MangaSource;
use crate::shared::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryStatus {
    Reading,
    Completed,
    OnHold,
    Dropped,
    PlanToRead,
}

impl LibraryStatus {
    pub const ALL: [LibraryStatus; 5] = [
        LibraryStatus::Reading,
        LibraryStatus::Completed,
        LibraryStatus::OnHold,
        LibraryStatus::Dropped,
        LibraryStatus::PlanToRead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryStatus::Reading => "reading",
            LibraryStatus::Completed => "completed",
            LibraryStatus::OnHold => "on_hold",
            LibraryStatus::Dropped => "dropped",
            LibraryStatus::PlanToRead => "plan_to_read",
        }
    }

    /// Human readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            LibraryStatus::Reading => "Currently Reading",
            LibraryStatus::Completed => "Completed",
            LibraryStatus::OnHold => "On Hold",
            LibraryStatus::Dropped => "Dropped",
            LibraryStatus::PlanToRead => "Plan to Read",
        }
    }
}

impl fmt::Display for LibraryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| AppError::ValidationError(format!("Invalid library status: {}", s)))
    }
}

/// One manga in a user's library, keyed by (user, manga, source)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    pub user_id: String,
    pub manga_id: String,
    pub source: MangaSource,
    pub manga_title: String,
    pub cover_image_url: Option<String>,
    pub status: LibraryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LibraryEntry {
    pub fn new(
        user_id: impl Into<String>,
        manga_id: impl Into<String>,
        source: MangaSource,
        manga_title: impl Into<String>,
        status: LibraryStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            manga_id: manga_id.into(),
            source,
            manga_title: manga_title.into(),
            cover_image_url: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_cover(mut self, cover_image_url: Option<String>) -> Self {
        self.cover_image_url = cover_image_url;
        self
    }

    pub fn update_status(&mut self, status: LibraryStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
