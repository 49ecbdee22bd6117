use serde::{Deserialize, Serialize};

/// Canonical publication status shared by every source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Ongoing,
    Completed,
    Hiatus,
    Cancelled,
    NotPublished,
    #[default]
    Unknown,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Ongoing => "ongoing",
            PublicationStatus::Completed => "completed",
            PublicationStatus::Hiatus => "hiatus",
            PublicationStatus::Cancelled => "cancelled",
            PublicationStatus::NotPublished => "not_published",
            PublicationStatus::Unknown => "unknown",
        }
    }

    /// Parse the canonical snake_case name; anything else is `Unknown`
    pub fn from_canonical(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ongoing" => PublicationStatus::Ongoing,
            "completed" => PublicationStatus::Completed,
            "hiatus" => PublicationStatus::Hiatus,
            "cancelled" => PublicationStatus::Cancelled,
            "not_published" => PublicationStatus::NotPublished,
            _ => PublicationStatus::Unknown,
        }
    }
}

impl std::fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
