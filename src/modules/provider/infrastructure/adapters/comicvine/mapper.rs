use serde_json::Value;

use super::models::*;
use crate::modules::provider::domain::services::normalization::{
    best_image, dedup_preserving_order, strip_html, UNKNOWN_TITLE,
};
use crate::modules::provider::domain::{
    split_credits, CatalogDetail, CatalogEntry, MangaSource, PublicationStatus,
};

const VOLUME_PREFIX: &str = "4050-";

/// ComicVine specific mapper implementation
#[derive(Debug, Clone, Default)]
pub struct ComicVineMapper;

impl ComicVineMapper {
    pub fn new() -> Self {
        Self
    }

    /// Volume id as used by `/volume/4050-{id}/`, taken from the detail URL
    /// when present
    pub fn volume_id(volume: &Volume) -> String {
        volume
            .api_detail_url
            .as_deref()
            .and_then(|url| url.trim_end_matches('/').rsplit('/').next())
            .map(|segment| segment.trim_start_matches(VOLUME_PREFIX))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| volume.id.to_string())
    }

    /// Any volume with issues counts as completed; ComicVine has no run status
    pub fn map_status(count_of_issues: Option<u32>) -> PublicationStatus {
        match count_of_issues {
            Some(count) if count > 0 => PublicationStatus::Completed,
            _ => PublicationStatus::Unknown,
        }
    }

    fn year(value: Option<&Value>) -> Option<i32> {
        match value? {
            Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn publisher(volume: &Volume) -> Option<String> {
        volume
            .publisher
            .as_ref()
            .and_then(|p| p.name.clone())
            .filter(|name| !name.trim().is_empty())
    }

    pub fn map_volume(&self, volume: &Volume) -> CatalogEntry {
        let image = volume.image.as_ref();

        CatalogEntry {
            id: Self::volume_id(volume),
            source: MangaSource::ComicVine,
            title: volume
                .name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            description: volume
                .description
                .as_deref()
                .map(strip_html)
                .unwrap_or_default(),
            cover_image_url: best_image([
                image.and_then(|i| i.original_url.as_deref()),
                image.and_then(|i| i.super_url.as_deref()),
                image.and_then(|i| i.medium_url.as_deref()),
                image.and_then(|i| i.small_url.as_deref()),
            ]),
            authors: Self::publisher(volume).into_iter().collect(),
            status: Self::map_status(volume.count_of_issues),
            genres: Vec::new(),
            year: Self::year(volume.start_year.as_ref()),
            popularity_score: 0.0,
            score: None,
        }
    }

    pub fn map_detail(&self, volume: &Volume) -> CatalogDetail {
        let (people_authors, artists) = split_credits(volume.people.iter().filter_map(|person| {
            person
                .name
                .clone()
                .map(|name| (name, person.role.clone().unwrap_or_default()))
        }));

        let mut detail = CatalogDetail::from_entry(self.map_volume(volume));
        detail.entry.authors = dedup_preserving_order(
            detail
                .entry
                .authors
                .iter()
                .map(String::as_str)
                .chain(people_authors.iter().map(String::as_str)),
        );
        detail.entry.genres = dedup_preserving_order(
            volume
                .concepts
                .iter()
                .filter_map(|concept| concept.name.as_deref()),
        );
        detail.artists = dedup_preserving_order(artists);
        detail.chapter_count = volume.count_of_issues;

        detail
    }
}
