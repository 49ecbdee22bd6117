//! Merging partial results from several adapters

use std::collections::HashSet;
use std::hash::Hash;

use crate::modules::provider::domain::{CatalogEntry, ChapterEntry};

/// Keep the first item for each key, in input order
pub fn dedup_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

/// Exact, case-sensitive title match
pub fn dedup_chapters_by_title(chapters: Vec<ChapterEntry>) -> Vec<ChapterEntry> {
    dedup_by_key(chapters, |chapter| chapter.title.clone())
}

pub fn dedup_entries_by_id(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    dedup_by_key(entries, |entry| entry.id.clone())
}

/// Sort by raw popularity, highest first. The sort is stable, so equal scores
/// keep the order their adapters were merged in.
pub fn rank_by_popularity(entries: &mut [CatalogEntry]) {
    entries.sort_by(|a, b| b.popularity_score.total_cmp(&a.popularity_score));
}

/// Share of `limit` given to one adapter, rounded down. Splits `limit` into
/// tens and remainder so large limits cannot overflow.
pub fn weighted_share(limit: usize, tenths: usize) -> usize {
    limit / 10 * tenths + limit % 10 * tenths / 10
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::provider::domain::MangaSource;

    fn entry(id: &str, source: MangaSource, score: f64) -> CatalogEntry {
        CatalogEntry::new(id, source, id).with_popularity(score)
    }

    #[test]
    fn test_weighted_share_rounds_down_independently() {
        assert_eq!(weighted_share(10, 5), 5);
        assert_eq!(weighted_share(10, 3), 3);
        assert_eq!(weighted_share(10, 2), 2);
        // 7 -> 3 + 2 + 1 = 6, undershoot accepted
        assert_eq!(
            weighted_share(7, 5) + weighted_share(7, 3) + weighted_share(7, 2),
            6
        );
        assert_eq!(weighted_share(1, 3), 0);
    }

    #[test]
    fn test_weighted_share_of_huge_limit_does_not_overflow() {
        assert_eq!(weighted_share(usize::MAX, 10), usize::MAX);
        assert_eq!(weighted_share(usize::MAX, 5), usize::MAX / 2);
        assert_eq!(weighted_share(usize::MAX / 2, 5), usize::MAX / 4);
        assert_eq!(weighted_share(19, 6), 11);
    }

    #[test]
    fn test_rank_is_stable_for_equal_scores() {
        let mut entries = vec![
            entry("a", MangaSource::MangaDex, 10.0),
            entry("b", MangaSource::Jikan, 20.0),
            entry("c", MangaSource::MyAnimeList, 10.0),
        ];
        rank_by_popularity(&mut entries);

        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let entries = vec![
            entry("1", MangaSource::MangaDex, 1.0),
            entry("2", MangaSource::MangaDex, 2.0),
            entry("1", MangaSource::Jikan, 3.0),
        ];
        let deduped = dedup_entries_by_id(entries);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].source, MangaSource::MangaDex);
    }

    #[test]
    fn test_chapter_title_dedup_is_case_sensitive() {
        let chapters = vec![
            ChapterEntry::new("1", "m", MangaSource::MangaDex).titled("Chapter 1"),
            ChapterEntry::new("2", "m", MangaSource::Kitsu).titled("chapter 1"),
            ChapterEntry::new("3", "n", MangaSource::Kitsu).titled("Chapter 1"),
        ];
        let ids: Vec<_> = dedup_chapters_by_title(chapters)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
