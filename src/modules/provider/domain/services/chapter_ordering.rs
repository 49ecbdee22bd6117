//! Ordering for volume and chapter labels.
//!
//! Labels that parse as numbers come first in numeric order, then other
//! labels in string order, then missing labels.

use std::cmp::Ordering;

use crate::modules::provider::domain::entities::ChapterEntry;

fn numeric(label: &str) -> Option<f64> {
    label.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Compare two optional volume or chapter labels
pub fn compare_labels(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        },
    }
}

pub fn compare_chapters(a: &ChapterEntry, b: &ChapterEntry) -> Ordering {
    compare_labels(a.volume.as_deref(), b.volume.as_deref()).then_with(|| {
        compare_labels(a.chapter_number.as_deref(), b.chapter_number.as_deref())
    })
}

/// Stable sort by `(volume, chapter number)`
pub fn sort_chapters(chapters: &mut [ChapterEntry]) {
    chapters.sort_by(compare_chapters);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::provider::MangaSource;

    fn chapter(id: &str, volume: Option<&str>, number: Option<&str>) -> ChapterEntry {
        ChapterEntry::new(id, "m", MangaSource::MangaDex).numbered(volume, number)
    }

    #[test]
    fn test_numeric_labels_compare_numerically() {
        assert_eq!(compare_labels(Some("2"), Some("10")), Ordering::Less);
        assert_eq!(compare_labels(Some("10.5"), Some("10")), Ordering::Greater);
    }

    #[test]
    fn test_text_labels_follow_numbers_and_missing_is_last() {
        assert_eq!(compare_labels(Some("Extra"), Some("99")), Ordering::Greater);
        assert_eq!(compare_labels(None, Some("Extra")), Ordering::Greater);
        assert_eq!(compare_labels(Some("Alpha"), Some("Beta")), Ordering::Less);
    }

    #[test]
    fn test_sort_chapters() {
        let mut chapters = vec![
            chapter("c", Some("2"), Some("10")),
            chapter("e", None, Some("1")),
            chapter("a", Some("1"), Some("2")),
            chapter("b", Some("1"), Some("10")),
            chapter("d", Some("10"), Some("1")),
        ];

        sort_chapters(&mut chapters);

        let ids: Vec<&str> = chapters.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }
}
