// ComicVine API models
use serde::Deserialize;

/// Envelope shared by every ComicVine response. `status_code` 1 means OK.
#[derive(Debug, Clone, Deserialize)]
pub struct ComicVineResponse<T> {
    pub status_code: i32,
    #[serde(default)]
    pub error: String,
    pub results: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Image {
    pub original_url: Option<String>,
    pub super_url: Option<String>,
    pub medium_url: Option<String>,
    pub small_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonCredit {
    #[serde(default)]
    pub name: Option<String>,
    /// Comma separated, e.g. "writer, penciler"
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub id: u64,
    #[serde(default)]
    pub api_detail_url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub publisher: Option<NamedResource>,
    /// Returned as a string ("1997") by the API
    #[serde(default)]
    pub start_year: Option<serde_json::Value>,
    #[serde(default)]
    pub count_of_issues: Option<u32>,
    #[serde(default)]
    pub people: Vec<PersonCredit>,
    #[serde(default)]
    pub concepts: Vec<NamedResource>,
}
