//! Jikan v4 payloads for the manga endpoints, reduced to the fields the
//! mapper reads. Unknown fields are ignored.

use serde::Deserialize;

/// `{"data": {...}}`
#[derive(Debug, Deserialize)]
pub struct JikanItem<T> {
    pub data: T,
}

/// `{"data": [...], "pagination": {...}}`; pagination is not followed
#[derive(Debug, Deserialize)]
pub struct JikanList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Author, genre or relation target
#[derive(Debug, Clone, Deserialize)]
pub struct MalEntity {
    pub mal_id: u32,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Images {
    pub jpg: Option<JpgImages>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JpgImages {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleVariant {
    /// "Default", "English", "Japanese", "Synonym"
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
}

impl TitleVariant {
    pub fn is_default(&self) -> bool {
        self.kind == "Default"
    }
}

/// `published.prop.from.year`; day and month are ignored
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Published {
    pub prop: Option<PublishedProp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishedProp {
    pub from: PartialDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartialDate {
    pub year: Option<i32>,
}

impl Published {
    pub fn start_year(&self) -> Option<i32> {
        self.prop.as_ref().and_then(|prop| prop.from.year)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manga {
    pub mal_id: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub titles: Vec<TitleVariant>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub images: Option<Images>,
    /// "Publishing", "Finished", "On Hiatus", ...
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub published: Option<Published>,
    #[serde(default)]
    pub chapters: Option<u32>,
    #[serde(default)]
    pub volumes: Option<u32>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub members: Option<u64>,
    #[serde(default)]
    pub authors: Vec<MalEntity>,
    #[serde(default)]
    pub genres: Vec<MalEntity>,
}

/// `/manga/{id}/full`: the core record plus relations
#[derive(Debug, Clone, Deserialize)]
pub struct MangaFull {
    #[serde(flatten)]
    pub core: Manga,
    #[serde(default)]
    pub relations: Vec<RelationGroup>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationGroup {
    #[serde(default)]
    pub entry: Vec<MalEntity>,
}

/// Item of `/manga/{id}/recommendations`
#[derive(Debug, Clone, Deserialize)]
pub struct Recommendation {
    pub entry: RecommendedManga,
    #[serde(default)]
    pub votes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendedManga {
    pub mal_id: u32,
    pub title: String,
    #[serde(default)]
    pub images: Option<Images>,
}
