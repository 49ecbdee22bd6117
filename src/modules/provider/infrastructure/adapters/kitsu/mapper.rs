use serde_json::Value;

use super::models::*;
use crate::modules::provider::domain::services::normalization::{
    best_image, dedup_preserving_order, extract_year, first_present, parse_timestamp,
    UNKNOWN_TITLE,
};
use crate::modules::provider::domain::{
    default_chapter_title, split_credits, CatalogDetail, CatalogEntry, ChapterEntry, MangaSource,
    PublicationStatus, UNKNOWN_MANGA_TITLE,
};

/// Kitsu specific mapper implementation
#[derive(Debug, Clone)]
pub struct KitsuMapper {
    locale: String,
}

impl KitsuMapper {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
        }
    }

    pub fn map_status(status: Option<&str>) -> PublicationStatus {
        match status.map(str::to_lowercase).as_deref() {
            Some("current") => PublicationStatus::Ongoing,
            Some("finished") => PublicationStatus::Completed,
            Some("tba") | Some("unreleased") | Some("upcoming") => PublicationStatus::NotPublished,
            Some("abandoned") => PublicationStatus::Cancelled,
            _ => PublicationStatus::Unknown,
        }
    }

    /// Locale title, then `en`, then `en_jp`, then the canonical title
    fn title_from(
        &self,
        titles: &serde_json::Map<String, Value>,
        canonical: Option<&str>,
    ) -> Option<String> {
        let title = |key: &str| titles.get(key).and_then(Value::as_str);
        first_present([
            title(&self.locale),
            title("en"),
            title("en_jp"),
            canonical,
        ])
    }

    fn label(value: Option<&Value>) -> Option<String> {
        match value? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    /// Genre names joined from the side-table; unresolved references are dropped
    fn genres(manga: &MangaResource, included: &[IncludedResource]) -> Vec<String> {
        dedup_preserving_order(
            related_ids(&manga.relationships, "genres")
                .into_iter()
                .filter_map(|id| find_included(included, "genres", &id.id))
                .filter_map(|genre| genre.attr_str("name")),
        )
    }

    /// `(name, role)` credits from staff entries joined to people
    fn credits<'a>(
        manga: &MangaResource,
        included: &'a [IncludedResource],
    ) -> Vec<(&'a str, &'a str)> {
        related_ids(&manga.relationships, "staff")
            .into_iter()
            .filter_map(|id| find_included(included, "mediaStaff", &id.id))
            .filter_map(|staff| {
                let person_id = related_ids(&staff.relationships, "person")
                    .into_iter()
                    .next()?;
                let person = find_included(included, "people", &person_id.id)?;
                Some((
                    person.attr_str("name").unwrap_or("Unknown"),
                    staff.attr_str("role").unwrap_or(""),
                ))
            })
            .collect()
    }

    pub fn map_manga(&self, manga: &MangaResource, included: &[IncludedResource]) -> CatalogEntry {
        let attrs = &manga.attributes;
        let poster = attrs.poster_image.as_ref();

        CatalogEntry {
            id: manga.id.clone(),
            source: MangaSource::Kitsu,
            title: self
                .title_from(&attrs.titles, attrs.canonical_title.as_deref())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            description: attrs.synopsis.clone().unwrap_or_default(),
            cover_image_url: best_image([
                poster.and_then(|p| p.original.as_deref()),
                poster.and_then(|p| p.large.as_deref()),
                poster.and_then(|p| p.medium.as_deref()),
                poster.and_then(|p| p.small.as_deref()),
            ]),
            authors: Vec::new(),
            status: Self::map_status(attrs.status.as_deref()),
            genres: Self::genres(manga, included),
            year: attrs.start_date.as_deref().and_then(extract_year),
            popularity_score: attrs.favorites_count.unwrap_or(0) as f64,
            score: attrs
                .average_rating
                .as_deref()
                .and_then(|rating| rating.trim().parse::<f64>().ok())
                .map(|rating| rating / 10.0),
        }
    }

    pub fn map_detail(&self, manga: &MangaResource, included: &[IncludedResource]) -> CatalogDetail {
        let attrs = &manga.attributes;
        let (authors, artists) = split_credits(Self::credits(manga, included));

        let mut entry = self.map_manga(manga, included);
        entry.authors = dedup_preserving_order(authors);

        let mut detail = CatalogDetail::from_entry(entry);
        detail.artists = dedup_preserving_order(artists);
        detail.alt_titles = dedup_preserving_order(
            attrs
                .titles
                .values()
                .filter_map(Value::as_str)
                .filter(|title| Some(*title) != attrs.canonical_title.as_deref())
                .filter(|title| *title != detail.entry.title),
        );
        detail.content_rating = attrs.age_rating.clone();
        detail.chapter_count = attrs.chapter_count;
        detail.volume_count = attrs.volume_count;

        detail
    }

    /// Map a chapter; the request's manga id stands in when the payload
    /// carries no manga relationship
    pub fn map_chapter(
        &self,
        chapter: &ChapterResource,
        included: &[IncludedResource],
        fallback_manga_id: &str,
    ) -> ChapterEntry {
        let attrs = &chapter.attributes;
        let manga_ref = related_ids(&chapter.relationships, "manga").into_iter().next();

        let manga_title = manga_ref
            .and_then(|id| find_included(included, "manga", &id.id))
            .and_then(|manga| {
                let titles = manga
                    .attributes
                    .get("titles")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                self.title_from(&titles, manga.attr_str("canonicalTitle"))
            })
            .unwrap_or_else(|| UNKNOWN_MANGA_TITLE.to_string());

        let chapter_number = Self::label(attrs.number.as_ref());

        ChapterEntry {
            id: chapter.id.clone(),
            manga_id: manga_ref
                .map(|id| id.id.clone())
                .unwrap_or_else(|| fallback_manga_id.to_string()),
            manga_title,
            volume: Self::label(attrs.volume_number.as_ref()),
            title: first_present([attrs.title.as_deref(), attrs.canonical_title.as_deref()])
                .unwrap_or_else(|| default_chapter_title(chapter_number.as_deref())),
            chapter_number,
            language: attrs.language.clone().unwrap_or_else(|| "en".to_string()),
            page_count: attrs.length.unwrap_or(0),
            published_at: attrs.published.as_deref().and_then(parse_timestamp),
            source: MangaSource::Kitsu,
        }
    }
}
