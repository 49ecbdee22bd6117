use super::models::*;
use crate::modules::provider::domain::services::normalization::{
    best_image, dedup_preserving_order, extract_year,
};
use crate::modules::provider::domain::{
    split_credits, CatalogDetail, CatalogEntry, MangaSource, PublicationStatus, RelatedReference,
};

/// MyAnimeList specific mapper implementation
#[derive(Debug, Clone, Default)]
pub struct MyAnimeListMapper;

impl MyAnimeListMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map_status(status: Option<&str>) -> PublicationStatus {
        match status.map(str::to_lowercase).as_deref() {
            Some("currently_publishing") => PublicationStatus::Ongoing,
            Some("finished") => PublicationStatus::Completed,
            Some("not_yet_published") => PublicationStatus::NotPublished,
            Some("on_hiatus") => PublicationStatus::Hiatus,
            Some("discontinued") => PublicationStatus::Cancelled,
            _ => PublicationStatus::Unknown,
        }
    }

    /// "First Last", skipping empty parts; "Unknown" when both are empty
    pub fn person_name(person: &Person) -> String {
        let name = [person.first_name.trim(), person.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            "Unknown".to_string()
        } else {
            name
        }
    }

    fn picture(picture: Option<&Picture>) -> Option<String> {
        best_image([
            picture.and_then(|p| p.large.as_deref()),
            picture.and_then(|p| p.medium.as_deref()),
        ])
    }

    fn credits(manga: &Manga) -> (Vec<String>, Vec<String>) {
        let (authors, artists) = split_credits(
            manga
                .authors
                .iter()
                .map(|credit| (Self::person_name(&credit.node), credit.role.as_str())),
        );
        (
            dedup_preserving_order(authors),
            dedup_preserving_order(artists),
        )
    }

    pub fn map_manga(&self, manga: &Manga) -> CatalogEntry {
        let (authors, _) = Self::credits(manga);

        CatalogEntry {
            id: manga.id.to_string(),
            source: MangaSource::MyAnimeList,
            title: manga.title.clone(),
            description: manga.synopsis.clone().unwrap_or_default(),
            cover_image_url: Self::picture(manga.main_picture.as_ref()),
            authors,
            status: Self::map_status(manga.status.as_deref()),
            genres: dedup_preserving_order(manga.genres.iter().map(|g| g.name.as_str())),
            year: manga.start_date.as_deref().and_then(extract_year),
            popularity_score: manga.num_list_users.unwrap_or(0) as f64,
            score: manga.mean,
        }
    }

    pub fn map_detail(&self, manga: &Manga) -> CatalogDetail {
        let (_, artists) = Self::credits(manga);
        let mut detail = CatalogDetail::from_entry(self.map_manga(manga));

        if let Some(alt) = &manga.alternative_titles {
            detail.alt_titles = dedup_preserving_order(
                [alt.en.as_deref(), alt.ja.as_deref()]
                    .into_iter()
                    .flatten()
                    .chain(alt.synonyms.iter().map(String::as_str)),
            );
        }
        detail.artists = artists;
        detail.content_rating = manga.nsfw.clone();
        detail.chapter_count = manga.num_chapters.filter(|count| *count > 0);
        detail.volume_count = manga.num_volumes.filter(|count| *count > 0);
        detail.related_recommendations = manga
            .recommendations
            .iter()
            .map(|rec| RelatedReference {
                id: rec.node.id.to_string(),
                title: rec.node.title.clone(),
                cover_image_url: Self::picture(rec.node.main_picture.as_ref()),
                source: MangaSource::MyAnimeList,
            })
            .collect();

        detail
    }
}
