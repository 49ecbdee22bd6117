use super::models::*;
use crate::modules::provider::domain::services::normalization::{
    best_image, dedup_preserving_order, first_present, UNKNOWN_TITLE,
};
use crate::modules::provider::domain::{
    CatalogDetail, CatalogEntry, MangaSource, PublicationStatus, RelatedReference,
};

const MAX_RELATED: usize = 6;

/// Fixed genre name -> Jikan genre id table
const GENRE_IDS: [(&str, u32); 13] = [
    ("action", 1),
    ("adventure", 2),
    ("comedy", 4),
    ("drama", 8),
    ("fantasy", 10),
    ("horror", 14),
    ("mystery", 7),
    ("romance", 22),
    ("sci-fi", 24),
    ("slice of life", 36),
    ("sports", 30),
    ("supernatural", 37),
    ("thriller", 41),
];

/// Jikan (MyAnimeList) specific mapper implementation
#[derive(Debug, Clone, Default)]
pub struct JikanMapper;

impl JikanMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn genre_id(genre: &str) -> Option<u32> {
        let genre = genre.trim().to_lowercase();
        GENRE_IDS
            .iter()
            .find(|(name, _)| *name == genre)
            .map(|(_, id)| *id)
    }

    pub fn map_status(status: Option<&str>) -> PublicationStatus {
        match status {
            Some("Publishing") => PublicationStatus::Ongoing,
            Some("Finished") => PublicationStatus::Completed,
            Some("On Hiatus") => PublicationStatus::Hiatus,
            Some("Discontinued") => PublicationStatus::Cancelled,
            Some("Not yet published") => PublicationStatus::NotPublished,
            _ => PublicationStatus::Unknown,
        }
    }

    fn cover(images: Option<&Images>) -> Option<String> {
        let jpg = images.and_then(|images| images.jpg.as_ref());
        best_image([
            jpg.and_then(|urls| urls.large_image_url.as_deref()),
            jpg.and_then(|urls| urls.image_url.as_deref()),
        ])
    }

    fn names(entities: &[MalEntity]) -> Vec<String> {
        dedup_preserving_order(entities.iter().map(|entity| entity.name.as_str()))
    }

    pub fn map_manga(&self, manga: &Manga) -> CatalogEntry {
        CatalogEntry {
            id: manga.mal_id.to_string(),
            source: MangaSource::Jikan,
            title: first_present([manga.title.as_deref()])
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            description: manga.synopsis.clone().unwrap_or_default(),
            cover_image_url: Self::cover(manga.images.as_ref()),
            authors: Self::names(&manga.authors),
            status: Self::map_status(manga.status.as_deref()),
            genres: Self::names(&manga.genres),
            year: manga.published.as_ref().and_then(Published::start_year),
            popularity_score: manga.members.unwrap_or(0) as f64,
            score: manga.score,
        }
    }

    pub fn map_detail(&self, manga: &MangaFull) -> CatalogDetail {
        let mut detail = CatalogDetail::from_entry(self.map_manga(&manga.core));

        detail.alt_titles = dedup_preserving_order(
            manga
                .core
                .titles
                .iter()
                .filter(|title| !title.is_default())
                .map(|title| title.title.as_str()),
        );
        detail.chapter_count = manga.core.chapters;
        detail.volume_count = manga.core.volumes;

        let recommended = manga
            .recommendations
            .iter()
            .map(|rec| Self::reference(&rec.entry));
        let related = manga
            .relations
            .iter()
            .flat_map(|group| group.entry.iter())
            .filter(|entity| entity.kind.as_deref() == Some("manga"))
            .map(|entity| RelatedReference {
                id: entity.mal_id.to_string(),
                title: entity.name.clone(),
                cover_image_url: None,
                source: MangaSource::Jikan,
            });

        let mut references: Vec<RelatedReference> = Vec::new();
        for reference in recommended.chain(related) {
            if references.len() == MAX_RELATED {
                break;
            }
            if references.iter().all(|seen| seen.id != reference.id) {
                references.push(reference);
            }
        }
        detail.related_recommendations = references;

        detail
    }

    fn reference(entry: &RecommendedManga) -> RelatedReference {
        RelatedReference {
            id: entry.mal_id.to_string(),
            title: entry.title.clone(),
            cover_image_url: Self::cover(entry.images.as_ref()),
            source: MangaSource::Jikan,
        }
    }

    /// Recommendations ordered by votes, most voted first; votes become popularity
    pub fn map_recommendations(&self, mut recommendations: Vec<Recommendation>) -> Vec<CatalogEntry> {
        recommendations.sort_by(|a, b| b.votes.cmp(&a.votes));
        recommendations
            .iter()
            .map(|rec| {
                let mut entry = CatalogEntry::new(
                    rec.entry.mal_id.to_string(),
                    MangaSource::Jikan,
                    rec.entry.title.clone(),
                )
                .with_popularity(rec.votes as f64);
                entry.cover_image_url = Self::cover(rec.entry.images.as_ref());
                entry
            })
            .collect()
    }
}
