use super::models::*;
use crate::modules::provider::domain::services::normalization::{
    dedup_preserving_order, first_present, parse_count, parse_timestamp, resolve_title,
};
use crate::modules::provider::domain::{
    default_chapter_title, CatalogDetail, CatalogEntry, ChapterEntry, ChapterImage, MangaSource,
    PublicationStatus, UNKNOWN_MANGA_TITLE,
};

pub const COVER_BASE_URL: &str = "https://uploads.mangadex.org/covers";

/// MangaDex specific mapper implementation
#[derive(Debug, Clone)]
pub struct MangaDexMapper {
    locale: String,
}

impl MangaDexMapper {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
        }
    }

    fn title(&self, text: &LocalizedText) -> String {
        resolve_title(text.entries(), &self.locale, None)
    }

    fn description(&self, text: &LocalizedText) -> String {
        first_present(
            std::iter::once(text.get(&self.locale))
                .chain(text.entries().into_iter().map(|(_, value)| Some(value))),
        )
        .unwrap_or_default()
    }

    fn people(relationships: &[Relationship], kind: &str) -> Vec<String> {
        dedup_preserving_order(
            relationships
                .iter()
                .filter(|rel| rel.kind == kind)
                .map(|rel| rel.attr_str("name").unwrap_or("Unknown")),
        )
    }

    fn cover_url(manga_id: &str, relationships: &[Relationship]) -> Option<String> {
        relationships
            .iter()
            .find(|rel| rel.kind == "cover_art")
            .and_then(|rel| rel.attr_str("fileName"))
            .filter(|name| !name.trim().is_empty())
            .map(|file_name| format!("{}/{}/{}", COVER_BASE_URL, manga_id, file_name))
    }

    fn genres(tags: &[Tag]) -> Vec<String> {
        dedup_preserving_order(tags.iter().filter_map(|tag| tag.attributes.name.get("en")))
    }

    pub fn map_status(status: Option<&str>) -> PublicationStatus {
        status
            .map(PublicationStatus::from_canonical)
            .unwrap_or_default()
    }

    pub fn map_manga(&self, manga: &Manga) -> CatalogEntry {
        let attrs = &manga.attributes;

        CatalogEntry {
            id: manga.id.clone(),
            source: MangaSource::MangaDex,
            title: self.title(&attrs.title),
            description: self.description(&attrs.description),
            cover_image_url: Self::cover_url(&manga.id, &manga.relationships),
            authors: Self::people(&manga.relationships, "author"),
            status: Self::map_status(attrs.status.as_deref()),
            genres: Self::genres(&attrs.tags),
            year: attrs.year,
            popularity_score: attrs.followed_count.unwrap_or(0.0),
            score: None,
        }
    }

    pub fn map_detail(&self, manga: &Manga) -> CatalogDetail {
        let attrs = &manga.attributes;
        let mut detail = CatalogDetail::from_entry(self.map_manga(manga));

        detail.alt_titles = dedup_preserving_order(
            attrs
                .alt_titles
                .iter()
                .flat_map(|alt| alt.entries().into_iter().map(|(_, title)| title)),
        );
        detail.artists = Self::people(&manga.relationships, "artist");
        detail.content_rating = attrs.content_rating.clone();
        detail.chapter_count = attrs.last_chapter.as_deref().and_then(parse_count);
        detail.volume_count = attrs.last_volume.as_deref().and_then(parse_count);

        detail
    }

    /// Map a chapter; `fallback_manga_id` is used when the payload carries no
    /// manga relationship
    pub fn map_chapter(&self, chapter: &Chapter, fallback_manga_id: &str) -> ChapterEntry {
        let attrs = &chapter.attributes;
        let manga = chapter.relationships.iter().find(|rel| rel.kind == "manga");

        let manga_title = manga
            .map(|rel| {
                let titles = rel.attr_localized("title");
                resolve_title(titles.entries(), &self.locale, Some(UNKNOWN_MANGA_TITLE))
            })
            .unwrap_or_else(|| UNKNOWN_MANGA_TITLE.to_string());

        ChapterEntry {
            id: chapter.id.clone(),
            manga_id: manga
                .map(|rel| rel.id.clone())
                .unwrap_or_else(|| fallback_manga_id.to_string()),
            manga_title,
            volume: first_present([attrs.volume.as_deref()]),
            chapter_number: first_present([attrs.chapter.as_deref()]),
            title: first_present([attrs.title.as_deref()])
                .unwrap_or_else(|| default_chapter_title(attrs.chapter.as_deref())),
            language: attrs
                .translated_language
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            page_count: attrs.pages.unwrap_or(0),
            published_at: attrs.publish_at.as_deref().and_then(parse_timestamp),
            source: MangaSource::MangaDex,
        }
    }

    pub fn map_images(server: &AtHomeServer) -> Vec<ChapterImage> {
        let base = server.base_url.trim_end_matches('/');
        ChapterImage::sequence(
            server
                .chapter
                .data
                .iter()
                .map(|file| format!("{}/data/{}/{}", base, server.chapter.hash, file)),
        )
    }
}
