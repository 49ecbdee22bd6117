// MangaDex v5 API models
// Only the fields the mapper reads; everything else is ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

// Response envelopes
#[derive(Debug, Clone, Deserialize)]
pub struct MangaDexList<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MangaDexItem<T> {
    pub data: T,
}

/// Language-keyed text. MangaDex sends `[]` instead of `{}` when empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Map(Map<String, Value>),
    Empty(Vec<Value>),
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Map(Map::new())
    }
}

impl LocalizedText {
    /// `(language, text)` pairs in payload order, string values only
    pub fn entries(&self) -> Vec<(&str, &str)> {
        match self {
            LocalizedText::Map(map) => map
                .iter()
                .filter_map(|(lang, value)| value.as_str().map(|text| (lang.as_str(), text)))
                .collect(),
            LocalizedText::Empty(_) => Vec::new(),
        }
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        match self {
            LocalizedText::Map(map) => map.get(lang).and_then(Value::as_str),
            LocalizedText::Empty(_) => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Present only for relationship types requested through `includes[]`
    #[serde(default)]
    pub attributes: Option<Value>,
}

impl Relationship {
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.as_ref()?.get(key)?.as_str()
    }

    pub fn attr_localized(&self, key: &str) -> LocalizedText {
        self.attributes
            .as_ref()
            .and_then(|attrs| attrs.get(key))
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manga {
    pub id: String,
    pub attributes: MangaAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MangaAttributes {
    pub title: LocalizedText,
    pub alt_titles: Vec<LocalizedText>,
    pub description: LocalizedText,
    pub status: Option<String>,
    pub year: Option<i32>,
    pub content_rating: Option<String>,
    pub tags: Vec<Tag>,
    pub last_chapter: Option<String>,
    pub last_volume: Option<String>,
    pub followed_count: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub attributes: TagAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagAttributes {
    pub name: LocalizedText,
    pub group: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub attributes: ChapterAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChapterAttributes {
    pub volume: Option<String>,
    pub chapter: Option<String>,
    pub title: Option<String>,
    pub translated_language: Option<String>,
    pub pages: Option<u32>,
    pub publish_at: Option<String>,
}

/// `/at-home/server/{chapterId}` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeServer {
    pub base_url: String,
    pub chapter: AtHomeChapter,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AtHomeChapter {
    pub hash: String,
    #[serde(default)]
    pub data: Vec<String>,
}
