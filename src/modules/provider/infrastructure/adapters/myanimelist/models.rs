// MyAnimeList API v2 models
// Field selection is explicit (`fields=`), so almost everything is optional.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MalPaged<T> {
    pub data: Vec<T>,
}

/// Wrapper used by list endpoints: `{ "node": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct MalNode<T> {
    pub node: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Picture {
    pub medium: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorCredit {
    pub node: Person,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlternativeTitles {
    pub synonyms: Vec<String>,
    pub en: Option<String>,
    pub ja: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationNode {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub main_picture: Option<Picture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recommendation {
    pub node: RecommendationNode,
    #[serde(default)]
    pub num_recommendations: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manga {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub main_picture: Option<Picture>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub authors: Vec<AuthorCredit>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub num_list_users: Option<u64>,
    #[serde(default)]
    pub num_volumes: Option<u32>,
    #[serde(default)]
    pub num_chapters: Option<u32>,
    #[serde(default)]
    pub alternative_titles: Option<AlternativeTitles>,
    /// "white", "gray" or "black"
    #[serde(default)]
    pub nsfw: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}
