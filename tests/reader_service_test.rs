//! Reader and library services over an in-memory repository

mod utils;

use manga_hub_lib::modules::aggregation::{CacheLayer, MangaAggregator};
use manga_hub_lib::modules::library::{
    InMemoryLibraryRepository, LibraryRepository, LibraryService, LibraryStatus, ReaderService,
};
use manga_hub_lib::modules::provider::domain::{
    CatalogDetail, ChapterEntry, ChapterImage, MangaSource,
};
use manga_hub_lib::modules::provider::AdapterRegistry;
use manga_hub_lib::AppError;
use std::sync::Arc;
use std::time::Duration;
use utils::fakes::{entry, FakeAdapter};

struct Fixture {
    reader: ReaderService,
    library: LibraryService,
    repository: Arc<InMemoryLibraryRepository>,
}

fn fixture(with_detail: bool) -> Fixture {
    let mut detail = CatalogDetail::from_entry(entry(MangaSource::MangaDex, "m1", 10.0));
    detail.entry.title = "Berserk".to_string();
    detail.entry.cover_image_url = Some("https://cdn/berserk.jpg".to_string());

    let mut mangadex = FakeAdapter::new(MangaSource::MangaDex)
        .with_chapters(vec![
            ChapterEntry::new("c2", "m1", MangaSource::MangaDex)
                .numbered(Some("1"), Some("2"))
                .titled("The Guardians of Desire"),
            ChapterEntry::new("c1", "m1", MangaSource::MangaDex)
                .numbered(Some("1"), Some("1"))
                .titled("The Black Swordsman"),
            ChapterEntry::new("c3", "m1", MangaSource::MangaDex)
                .numbered(Some("1"), Some("3"))
                .titled("The Guardians of Desire (2)"),
        ])
        .with_images(ChapterImage::sequence(
            (1..=4).map(|page| format!("https://img/{}.png", page)),
        ));
    if with_detail {
        mangadex = mangadex.with_detail(detail);
    }

    let registry = AdapterRegistry::new().with(Arc::new(mangadex));
    let aggregator = Arc::new(MangaAggregator::new(
        registry,
        Arc::new(CacheLayer::in_memory(100)),
        Duration::from_secs(5),
    ));
    let repository = Arc::new(InMemoryLibraryRepository::new());

    Fixture {
        reader: ReaderService::new(aggregator.clone(), repository.clone()),
        library: LibraryService::new(aggregator, repository.clone()),
        repository,
    }
}

#[tokio::test]
async fn test_open_chapter_links_neighbours_and_records_progress() {
    let fx = fixture(true);

    let view = fx
        .reader
        .open_chapter(Some("u1"), "m1", "c2", "mangadex")
        .await
        .unwrap()
        .expect("reader view");

    assert_eq!(view.manga.title(), "Berserk");
    assert_eq!(view.chapter.id, "c2");
    assert_eq!(view.prev_chapter.map(|c| c.id), Some("c1".to_string()));
    assert_eq!(view.next_chapter.map(|c| c.id), Some("c3".to_string()));
    assert_eq!(view.images.len(), 4);

    let progress = fx
        .repository
        .latest_progress("u1", "m1", MangaSource::MangaDex)
        .await
        .unwrap()
        .expect("progress recorded");
    assert_eq!(progress.chapter_id, "c2");
    assert_eq!(progress.last_page, 1);
    assert_eq!(progress.total_pages, 4);
    assert_eq!(progress.manga_title, "Berserk");
}

#[tokio::test]
async fn test_first_chapter_has_no_previous() {
    let fx = fixture(true);

    let view = fx
        .reader
        .open_chapter(None, "m1", "c1", "mangadex")
        .await
        .unwrap()
        .expect("reader view");

    assert!(view.prev_chapter.is_none());
    assert_eq!(view.next_chapter.map(|c| c.id), Some("c2".to_string()));
    assert!(fx.library.history("u1", 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_chapter_or_manga_is_none() {
    let fx = fixture(false);

    assert!(fx
        .reader
        .open_chapter(Some("u1"), "m1", "c9", "mangadex")
        .await
        .unwrap()
        .is_none());
    assert!(fx
        .reader
        .open_chapter(Some("u1"), "m1", "c1", "mangadex")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_update_progress_moves_last_page() {
    let fx = fixture(true);
    fx.reader
        .open_chapter(Some("u1"), "m1", "c3", "mangadex")
        .await
        .unwrap();

    assert!(fx
        .reader
        .update_progress("u1", "m1", "c3", "mangadex", 3)
        .await
        .unwrap());
    assert!(!fx
        .reader
        .update_progress("u1", "m1", "c1", "mangadex", 3)
        .await
        .unwrap());
    assert!(matches!(
        fx.reader
            .update_progress("u1", "m1", "c3", "mangadex", 0)
            .await,
        Err(AppError::ValidationError(_))
    ));

    let history = fx.library.history("u1", 1).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].last_page, 3);
}

#[tokio::test]
async fn test_library_add_update_overview_and_remove() {
    let fx = fixture(true);

    let added = fx
        .library
        .add_to_library("u1", "m1", "mangadex", LibraryStatus::PlanToRead)
        .await
        .unwrap();
    assert_eq!(added.manga_title, "Berserk");
    assert_eq!(added.cover_image_url.as_deref(), Some("https://cdn/berserk.jpg"));

    let updated = fx
        .library
        .update_status("u1", "m1", "mangadex", LibraryStatus::Reading)
        .await
        .unwrap();
    assert_eq!(updated.status, LibraryStatus::Reading);

    fx.reader
        .open_chapter(Some("u1"), "m1", "c1", "mangadex")
        .await
        .unwrap();
    let overview = fx.library.library_overview("u1").await.unwrap();
    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].library_status, LibraryStatus::Reading);
    assert_eq!(
        overview[0].reading_progress.as_ref().map(|p| p.chapter_id.as_str()),
        Some("c1")
    );

    assert!(fx.library.remove("u1", "m1", "mangadex").await.unwrap());
    assert!(!fx.library.remove("u1", "m1", "mangadex").await.unwrap());
    assert!(fx.library.library_overview("u1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_adding_unresolvable_manga_fails() {
    let fx = fixture(false);

    let result = fx
        .library
        .add_to_library("u1", "m1", "mangadex", LibraryStatus::Reading)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
