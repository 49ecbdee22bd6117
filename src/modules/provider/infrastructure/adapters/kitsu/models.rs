// Kitsu JSON:API models
// Resources reference each other through `relationships`; the referenced
// records arrive in the top-level `included` side-table.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct KitsuDocument<T> {
    pub data: T,
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ResourceId {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// To-one relationships carry an object, to-many an array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    One(ResourceId),
    Many(Vec<ResourceId>),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

impl Relationship {
    pub fn ids(&self) -> Vec<&ResourceId> {
        match &self.data {
            Some(Linkage::One(id)) => vec![id],
            Some(Linkage::Many(ids)) => ids.iter().collect(),
            None => Vec::new(),
        }
    }
}

pub type Relationships = HashMap<String, Relationship>;

/// Linked ids of one named relationship, empty when absent
pub fn related_ids<'a>(relationships: &'a Relationships, name: &str) -> Vec<&'a ResourceId> {
    relationships
        .get(name)
        .map(Relationship::ids)
        .unwrap_or_default()
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncludedResource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Value,
    #[serde(default)]
    pub relationships: Relationships,
}

impl IncludedResource {
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)?.as_str()
    }
}

/// Look up a record in the side-table; missing records yield `None`
pub fn find_included<'a>(
    included: &'a [IncludedResource],
    kind: &str,
    id: &str,
) -> Option<&'a IncludedResource> {
    included
        .iter()
        .find(|resource| resource.kind == kind && resource.id == id)
}

#[derive(Debug, Clone, Deserialize)]
pub struct MangaResource {
    pub id: String,
    #[serde(default)]
    pub attributes: MangaAttributes,
    #[serde(default)]
    pub relationships: Relationships,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MangaAttributes {
    pub titles: Map<String, Value>,
    pub canonical_title: Option<String>,
    pub synopsis: Option<String>,
    pub poster_image: Option<PosterImage>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub favorites_count: Option<u64>,
    /// Percentage as a decimal string ("82.45")
    pub average_rating: Option<String>,
    pub age_rating: Option<String>,
    pub chapter_count: Option<u32>,
    pub volume_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PosterImage {
    pub original: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChapterResource {
    pub id: String,
    #[serde(default)]
    pub attributes: ChapterAttributes,
    #[serde(default)]
    pub relationships: Relationships,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChapterAttributes {
    pub title: Option<String>,
    pub canonical_title: Option<String>,
    /// Numbers may arrive as JSON numbers or strings
    pub number: Option<Value>,
    pub volume_number: Option<Value>,
    pub published: Option<String>,
    pub length: Option<u32>,
    pub language: Option<String>,
}
