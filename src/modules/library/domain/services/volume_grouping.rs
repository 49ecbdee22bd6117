use serde::{Deserialize, Serialize};

use crate::modules::provider::domain::services::chapter_ordering::{compare_labels, sort_chapters};
use crate::modules::provider::domain::ChapterEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeGroup {
    /// `None` collects chapters without a volume
    pub volume: Option<String>,
    pub chapters: Vec<ChapterEntry>,
}

/// Group chapters for display: volumes ascending (numeric labels first), the
/// no-volume group last, chapters ordered inside each group
pub fn group_chapters_by_volume(chapters: &[ChapterEntry]) -> Vec<VolumeGroup> {
    let mut sorted = chapters.to_vec();
    sort_chapters(&mut sorted);

    let mut volumes: Vec<Option<String>> = Vec::new();
    for chapter in &sorted {
        if !volumes.contains(&chapter.volume) {
            volumes.push(chapter.volume.clone());
        }
    }
    volumes.sort_by(|a, b| compare_labels(a.as_deref(), b.as_deref()).then_with(|| a.cmp(b)));

    volumes
        .into_iter()
        .map(|volume| VolumeGroup {
            chapters: sorted
                .iter()
                .filter(|chapter| chapter.volume == volume)
                .cloned()
                .collect(),
            volume,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::provider::domain::MangaSource;

    fn chapter(id: &str, volume: Option<&str>, number: &str) -> ChapterEntry {
        ChapterEntry::new(id, "m", MangaSource::MangaDex).numbered(volume, Some(number))
    }

    #[test]
    fn test_groups_in_volume_order_with_loose_chapters_last() {
        let chapters = vec![
            chapter("c", None, "30"),
            chapter("b", Some("10"), "20"),
            chapter("a2", Some("2"), "11"),
            chapter("a1", Some("2"), "10"),
        ];

        let groups = group_chapters_by_volume(&chapters);
        let volumes: Vec<_> = groups.iter().map(|g| g.volume.as_deref()).collect();
        assert_eq!(volumes, vec![Some("2"), Some("10"), None]);

        let first: Vec<_> = groups[0].chapters.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(first, vec!["a1", "a2"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_chapters_by_volume(&[]).is_empty());
    }
}
