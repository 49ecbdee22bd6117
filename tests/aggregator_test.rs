//! Aggregator behavior over in-process adapters
//!
//! Covers the fan-out split, top-up, merge order, cache expiry and the
//! per-adapter failure boundary.

mod utils;

use manga_hub_lib::modules::aggregation::{
    CacheLayer, InMemoryCacheStore, MangaAggregator, ManualClock,
};
use manga_hub_lib::modules::provider::domain::{
    CatalogDetail, ChapterEntry, ChapterImage, MangaSource, SearchCriteria,
};
use manga_hub_lib::modules::provider::infrastructure::adapters::MyAnimeListAdapter;
use manga_hub_lib::modules::provider::{AdapterRegistry, MangaSourceAdapter};
use std::sync::Arc;
use std::time::Duration;
use utils::fakes::{chapter, entry, FakeAdapter};

fn build(adapters: Vec<Arc<dyn MangaSourceAdapter>>) -> (MangaAggregator, Arc<ManualClock>) {
    build_with_timeout(adapters, Duration::from_secs(5))
}

fn build_with_timeout(
    adapters: Vec<Arc<dyn MangaSourceAdapter>>,
    timeout: Duration,
) -> (MangaAggregator, Arc<ManualClock>) {
    let registry = adapters
        .into_iter()
        .fold(AdapterRegistry::new(), |registry, adapter| registry.with(adapter));
    let clock = Arc::new(ManualClock::default());
    let cache = CacheLayer::new(Arc::new(InMemoryCacheStore::new(100)), clock.clone());
    (
        MangaAggregator::new(registry, Arc::new(cache), timeout),
        clock,
    )
}

#[tokio::test]
async fn test_popular_splits_limit_and_ranks_across_sources() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex).with_popular(vec![
        entry(MangaSource::MangaDex, "d1", 900.0),
        entry(MangaSource::MangaDex, "d2", 400.0),
        entry(MangaSource::MangaDex, "d3", 100.0),
        entry(MangaSource::MangaDex, "d4", 50.0),
        entry(MangaSource::MangaDex, "d5", 10.0),
        entry(MangaSource::MangaDex, "d6", 5.0),
    ]);
    let mal = FakeAdapter::new(MangaSource::MyAnimeList);
    let jikan = FakeAdapter::new(MangaSource::Jikan).with_popular(vec![
        entry(MangaSource::Jikan, "j1", 500.0),
        entry(MangaSource::Jikan, "j2", 20.0),
    ]);
    let (mangadex_calls, mal_calls, jikan_calls) = (mangadex.calls(), mal.calls(), jikan.calls());

    let (aggregator, _) = build(vec![Arc::new(mangadex), Arc::new(mal), Arc::new(jikan)]);
    let popular = aggregator.get_popular_manga(10).await.unwrap();

    assert_eq!(mangadex_calls.limits("popular"), vec![Some(5)]);
    assert_eq!(mal_calls.limits("popular"), vec![Some(3)]);
    assert_eq!(jikan_calls.limits("popular"), vec![Some(2)]);

    let ids: Vec<&str> = popular.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["d1", "j1", "d2", "d3", "d4", "j2", "d5"]);
}

#[tokio::test]
async fn test_popular_is_served_from_cache_on_second_call() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex)
        .with_popular(vec![entry(MangaSource::MangaDex, "d1", 1.0)]);
    let calls = mangadex.calls();

    let (aggregator, _) = build(vec![Arc::new(mangadex)]);
    let first = aggregator.get_popular_manga(10).await.unwrap();
    let second = aggregator.get_popular_manga(10).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.count("popular"), 1);
    assert_eq!(aggregator.cache_stats().await.hits, 1);
}

#[tokio::test]
async fn test_popular_without_mal_credentials_keeps_other_sources() {
    // Never contacted: the missing client id short-circuits before any request
    let mal = MyAnimeListAdapter::with_client(
        utils::test_client("MyAnimeList"),
        "http://127.0.0.1:9",
        None,
    );
    let mangadex = FakeAdapter::new(MangaSource::MangaDex)
        .with_popular(vec![entry(MangaSource::MangaDex, "d1", 10.0)]);
    let jikan = FakeAdapter::new(MangaSource::Jikan)
        .with_popular(vec![entry(MangaSource::Jikan, "j1", 20.0)]);

    let (aggregator, _) = build(vec![Arc::new(mangadex), Arc::new(mal), Arc::new(jikan)]);
    let popular = aggregator.get_popular_manga(10).await.unwrap();

    let ids: Vec<&str> = popular.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["j1", "d1"]);
}

#[tokio::test]
async fn test_popular_small_limit_skips_zero_shares() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex);
    let jikan = FakeAdapter::new(MangaSource::Jikan);
    let (mangadex_calls, jikan_calls) = (mangadex.calls(), jikan.calls());

    let (aggregator, _) = build(vec![Arc::new(mangadex), Arc::new(jikan)]);
    let popular = aggregator.get_popular_manga(2).await.unwrap();

    assert!(popular.is_empty());
    assert_eq!(mangadex_calls.limits("popular"), vec![Some(1)]);
    assert_eq!(jikan_calls.count("popular"), 0);
}

#[tokio::test]
async fn test_slow_adapter_is_cut_off_by_timeout() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex)
        .with_popular(vec![entry(MangaSource::MangaDex, "d1", 1.0)]);
    let jikan = FakeAdapter::new(MangaSource::Jikan)
        .with_popular(vec![entry(MangaSource::Jikan, "j1", 99.0)])
        .with_delay(Duration::from_millis(500));

    let (aggregator, _) = build_with_timeout(
        vec![Arc::new(mangadex), Arc::new(jikan)],
        Duration::from_millis(50),
    );
    let popular = aggregator.get_popular_manga(10).await.unwrap();

    let ids: Vec<&str> = popular.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["d1"]);
}

#[tokio::test]
async fn test_latest_tops_up_from_kitsu_and_dedups_titles() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex).with_latest(vec![
        chapter(MangaSource::MangaDex, "c1", "Chapter 1"),
        chapter(MangaSource::MangaDex, "c2", "Chapter 2"),
        chapter(MangaSource::MangaDex, "c3", "Chapter 3"),
    ]);
    let kitsu = FakeAdapter::new(MangaSource::Kitsu).with_latest(vec![
        chapter(MangaSource::Kitsu, "k1", "Chapter 2"),
        chapter(MangaSource::Kitsu, "k2", "Prologue"),
        chapter(MangaSource::Kitsu, "k3", "Extra"),
    ]);
    let kitsu_calls = kitsu.calls();

    let (aggregator, _) = build(vec![Arc::new(mangadex), Arc::new(kitsu)]);
    let latest = aggregator.get_latest_releases(5).await.unwrap();

    assert_eq!(kitsu_calls.limits("latest"), vec![Some(2)]);
    // The duplicate title is dropped and the shortfall is not refilled
    let ids: Vec<&str> = latest.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2", "c3", "k2"]);
}

#[tokio::test]
async fn test_latest_full_primary_skips_secondary() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex).with_latest(vec![
        chapter(MangaSource::MangaDex, "c1", "A"),
        chapter(MangaSource::MangaDex, "c2", "B"),
    ]);
    let kitsu = FakeAdapter::new(MangaSource::Kitsu);
    let kitsu_calls = kitsu.calls();

    let (aggregator, _) = build(vec![Arc::new(mangadex), Arc::new(kitsu)]);
    let latest = aggregator.get_latest_releases(2).await.unwrap();

    assert_eq!(latest.len(), 2);
    assert_eq!(kitsu_calls.total(), 0);
}

#[tokio::test]
async fn test_latest_without_secondary_adapter_returns_primary_only() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex)
        .with_latest(vec![chapter(MangaSource::MangaDex, "c1", "A")]);

    let (aggregator, _) = build(vec![Arc::new(mangadex)]);
    let latest = aggregator.get_latest_releases(5).await.unwrap();

    assert_eq!(latest.len(), 1);
}

#[tokio::test]
async fn test_search_tops_up_with_title_only_and_dedups_ids() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex).with_search(vec![
        entry(MangaSource::MangaDex, "42", 0.0),
        entry(MangaSource::MangaDex, "a", 0.0),
    ]);
    let jikan = FakeAdapter::new(MangaSource::Jikan).with_search(vec![
        entry(MangaSource::Jikan, "42", 0.0),
        entry(MangaSource::Jikan, "b", 0.0),
    ]);
    let jikan_calls = jikan.calls();

    let (aggregator, _) = build(vec![Arc::new(mangadex), Arc::new(jikan)]);
    let criteria = SearchCriteria::by_title("monster").with_year(1994);
    let results = aggregator.search_manga(&criteria, 5).await.unwrap();

    assert_eq!(jikan_calls.limits("search"), vec![Some(3)]);
    let ids: Vec<(&str, MangaSource)> = results.iter().map(|e| (e.id.as_str(), e.source)).collect();
    assert_eq!(
        ids,
        vec![
            ("42", MangaSource::MangaDex),
            ("a", MangaSource::MangaDex),
            ("b", MangaSource::Jikan),
        ]
    );
}

#[tokio::test]
async fn test_search_without_title_stays_on_primary() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex);
    let jikan = FakeAdapter::new(MangaSource::Jikan);
    let jikan_calls = jikan.calls();

    let (aggregator, _) = build(vec![Arc::new(mangadex), Arc::new(jikan)]);
    let criteria = SearchCriteria::default().with_author("Urasawa");
    let results = aggregator.search_manga(&criteria, 5).await.unwrap();

    assert!(results.is_empty());
    assert_eq!(jikan_calls.total(), 0);
}

#[tokio::test]
async fn test_images_expire_after_fifteen_minutes() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex).with_images(ChapterImage::sequence([
        "https://img/1.png".to_string(),
        "https://img/2.png".to_string(),
    ]));
    let calls = mangadex.calls();

    let (aggregator, clock) = build(vec![Arc::new(mangadex)]);
    let first = aggregator.get_chapter_images("ch1", "mangadex").await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].index, 2);

    clock.advance_secs(899);
    aggregator.get_chapter_images("ch1", "mangadex").await.unwrap();
    assert_eq!(calls.count("images"), 1);

    clock.advance_secs(2);
    aggregator.get_chapter_images("ch1", "mangadex").await.unwrap();
    assert_eq!(calls.count("images"), 2);
}

#[tokio::test]
async fn test_missing_details_are_not_cached() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex);
    let calls = mangadex.calls();

    let (aggregator, _) = build(vec![Arc::new(mangadex)]);
    assert!(aggregator.get_manga_details("gone", "mangadex").await.unwrap().is_none());
    assert!(aggregator.get_manga_details("gone", "mangadex").await.unwrap().is_none());

    assert_eq!(calls.count("detail"), 2);
}

#[tokio::test]
async fn test_details_with_unknown_source_use_primary() {
    let detail = CatalogDetail::from_entry(entry(MangaSource::MangaDex, "x1", 3.0));
    let mangadex = FakeAdapter::new(MangaSource::MangaDex).with_detail(detail.clone());
    let calls = mangadex.calls();

    let (aggregator, _) = build(vec![Arc::new(mangadex)]);
    let found = aggregator.get_manga_details("x1", "anilist").await.unwrap();
    let again = aggregator.get_manga_details("x1", "mangadex").await.unwrap();

    assert_eq!(found, Some(detail));
    assert_eq!(found, again);
    assert_eq!(calls.count("detail"), 1);
}

#[tokio::test]
async fn test_chapters_are_ordered_by_volume_then_number() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex).with_chapters(vec![
        ChapterEntry::new("c10", "m1", MangaSource::MangaDex).numbered(Some("2"), Some("10")),
        ChapterEntry::new("c2", "m1", MangaSource::MangaDex).numbered(Some("1"), Some("2")),
        ChapterEntry::new("c1", "m1", MangaSource::MangaDex).numbered(Some("1"), Some("1")),
    ]);

    let (aggregator, _) = build(vec![Arc::new(mangadex)]);
    let chapters = aggregator.get_manga_chapters("m1", "mangadex").await.unwrap();

    let ids: Vec<&str> = chapters.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2", "c10"]);
}

#[tokio::test]
async fn test_genre_splits_sixty_forty_and_dedups() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex).with_by_genre(vec![
        entry(MangaSource::MangaDex, "1", 0.0),
        entry(MangaSource::MangaDex, "2", 0.0),
    ]);
    let jikan = FakeAdapter::new(MangaSource::Jikan).with_by_genre(vec![
        entry(MangaSource::Jikan, "2", 0.0),
        entry(MangaSource::Jikan, "3", 0.0),
    ]);
    let (mangadex_calls, jikan_calls) = (mangadex.calls(), jikan.calls());

    let (aggregator, _) = build(vec![Arc::new(mangadex), Arc::new(jikan)]);
    let results = aggregator.get_manga_by_genre("Horror", 10).await.unwrap();

    assert_eq!(mangadex_calls.limits("by_genre"), vec![Some(6)]);
    assert_eq!(jikan_calls.limits("by_genre"), vec![Some(4)]);
    let ids: Vec<&str> = results.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_similar_goes_to_named_source_and_respects_limit() {
    let jikan = FakeAdapter::new(MangaSource::Jikan).with_similar(vec![
        entry(MangaSource::Jikan, "s1", 0.0),
        entry(MangaSource::Jikan, "s2", 0.0),
        entry(MangaSource::Jikan, "s3", 0.0),
    ]);
    let mangadex = FakeAdapter::new(MangaSource::MangaDex);
    let (jikan_calls, mangadex_calls) = (jikan.calls(), mangadex.calls());

    let (aggregator, _) = build(vec![Arc::new(mangadex), Arc::new(jikan)]);
    let similar = aggregator.get_similar_manga("2", "jikan", 2).await.unwrap();
    let none = aggregator.get_similar_manga("2", "jikan", 0).await.unwrap();

    assert_eq!(similar.len(), 2);
    assert!(none.is_empty());
    assert_eq!(jikan_calls.count("similar"), 1);
    assert_eq!(mangadex_calls.total(), 0);
}

#[tokio::test]
async fn test_unbounded_limits_split_without_overflow() {
    let mangadex = FakeAdapter::new(MangaSource::MangaDex)
        .with_popular(vec![entry(MangaSource::MangaDex, "d1", 3.0)])
        .with_by_genre(vec![entry(MangaSource::MangaDex, "g1", 0.0)]);
    let jikan = FakeAdapter::new(MangaSource::Jikan)
        .with_popular(vec![entry(MangaSource::Jikan, "j1", 7.0)])
        .with_by_genre(vec![entry(MangaSource::Jikan, "g2", 0.0)]);
    let (mangadex_calls, jikan_calls) = (mangadex.calls(), jikan.calls());

    let (aggregator, _) = build(vec![Arc::new(mangadex), Arc::new(jikan)]);
    let popular = aggregator.get_popular_manga(usize::MAX).await.unwrap();
    let by_genre = aggregator
        .get_manga_by_genre("Horror", usize::MAX)
        .await
        .unwrap();

    let ids: Vec<&str> = popular.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["j1", "d1"]);
    assert_eq!(mangadex_calls.limits("popular"), vec![Some(usize::MAX / 2)]);
    assert_eq!(jikan_calls.limits("popular"), vec![Some(usize::MAX / 5)]);

    let ids: Vec<&str> = by_genre.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["g1", "g2"]);
}
