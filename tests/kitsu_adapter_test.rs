mod utils;

use axum::extract::{Path, RawQuery};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use manga_hub_lib::modules::provider::domain::MangaSource;
use manga_hub_lib::modules::provider::infrastructure::adapters::KitsuAdapter;
use manga_hub_lib::modules::provider::MangaSourceAdapter;
use serde_json::json;
use std::sync::{Arc, Mutex};

async fn adapter_for(router: Router) -> KitsuAdapter {
    let base_url = utils::spawn_stub(router).await;
    KitsuAdapter::with_client(utils::test_client("Kitsu"), &base_url, "en")
}

#[tokio::test]
async fn test_latest_resolves_manga_from_included() {
    let router = Router::new().route(
        "/chapters",
        get(|| async {
            Json(json!({
                "data": [{
                    "id": "900",
                    "type": "chapters",
                    "attributes": {
                        "canonicalTitle": "Romance Dawn",
                        "number": 1,
                        "volumeNumber": 1,
                        "length": 53,
                        "published": "1997-07-22"
                    },
                    "relationships": {
                        "manga": { "data": { "id": "38", "type": "manga" } }
                    }
                }],
                "included": [{
                    "id": "38",
                    "type": "manga",
                    "attributes": { "canonicalTitle": "One Piece", "titles": { "en": "One Piece" } }
                }]
            }))
        }),
    );
    let adapter = adapter_for(router).await;

    let latest = adapter.fetch_latest(10).await;

    assert_eq!(latest.len(), 1);
    let chapter = &latest[0];
    assert_eq!(chapter.source, MangaSource::Kitsu);
    assert_eq!(chapter.manga_id, "38");
    assert_eq!(chapter.manga_title, "One Piece");
    assert_eq!(chapter.title, "Romance Dawn");
    assert_eq!(chapter.chapter_number.as_deref(), Some("1"));
    assert_eq!(chapter.page_count, 53);
}

#[tokio::test]
async fn test_server_error_yields_empty_latest() {
    let router = Router::new().route(
        "/chapters",
        get(|| async { (StatusCode::BAD_GATEWAY, "bad gateway") }),
    );
    let adapter = adapter_for(router).await;

    assert!(adapter.fetch_latest(10).await.is_empty());
}

#[tokio::test]
async fn test_kitsu_serves_no_images_or_popular() {
    let adapter = adapter_for(Router::new()).await;

    assert!(adapter.fetch_chapter_images("900").await.is_empty());
    assert!(adapter.fetch_popular(5).await.is_empty());
}

#[tokio::test]
async fn test_detail_joins_included_genres_and_staff() {
    let seen_query = Arc::new(Mutex::new(String::new()));
    let query_slot = seen_query.clone();
    let router = Router::new().route(
        "/manga/{id}",
        get(move |Path(id): Path<String>, RawQuery(query): RawQuery| {
            *query_slot.lock().unwrap() = query.unwrap_or_default();
            async move {
                Json(json!({
                    "data": {
                        "id": id,
                        "type": "manga",
                        "attributes": {
                            "titles": { "en": "Attack on Titan", "en_jp": "Shingeki no Kyojin" },
                            "canonicalTitle": "Shingeki no Kyojin",
                            "posterImage": { "original": "https://media.kitsu.io/poster.jpg" },
                            "status": "finished",
                            "favoritesCount": 1500
                        },
                        "relationships": {
                            "genres": { "data": [{ "id": "1", "type": "genres" }] },
                            "staff": { "data": [
                                { "id": "s1", "type": "mediaStaff" },
                                { "id": "s2", "type": "mediaStaff" }
                            ] }
                        }
                    },
                    "included": [
                        { "id": "1", "type": "genres", "attributes": { "name": "Action" } },
                        { "id": "s1", "type": "mediaStaff", "attributes": { "role": "Story & Art" },
                          "relationships": { "person": { "data": { "id": "p1", "type": "people" } } } },
                        { "id": "s2", "type": "mediaStaff", "attributes": { "role": "Illustrator" },
                          "relationships": { "person": { "data": { "id": "p2", "type": "people" } } } },
                        { "id": "p1", "type": "people", "attributes": { "name": "Hajime Isayama" } },
                        { "id": "p2", "type": "people", "attributes": { "name": "Someone Else" } }
                    ]
                }))
            }
        }),
    );
    let adapter = adapter_for(router).await;

    let detail = adapter.fetch_detail("25").await.expect("detail");

    assert_eq!(detail.entry.id, "25");
    assert_eq!(detail.entry.source, MangaSource::Kitsu);
    assert_eq!(detail.entry.title, "Attack on Titan");
    assert_eq!(detail.entry.genres, vec!["Action"]);
    assert_eq!(detail.entry.authors, vec!["Hajime Isayama"]);
    assert_eq!(detail.artists, vec!["Someone Else"]);
    assert_eq!(
        detail.entry.cover_image_url.as_deref(),
        Some("https://media.kitsu.io/poster.jpg")
    );
    assert!(seen_query.lock().unwrap().contains("staff.person"));
}

#[tokio::test]
async fn test_missing_manga_yields_none() {
    let router = Router::new().route(
        "/manga/{id}",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "errors": [{ "title": "Record not found", "status": "404" }] })),
            )
        }),
    );
    let adapter = adapter_for(router).await;

    assert!(adapter.fetch_detail("404404").await.is_none());
}

#[tokio::test]
async fn test_chapters_filter_by_manga() {
    let seen_query = Arc::new(Mutex::new(String::new()));
    let query_slot = seen_query.clone();
    let router = Router::new().route(
        "/chapters",
        get(move |RawQuery(query): RawQuery| {
            *query_slot.lock().unwrap() = query.unwrap_or_default();
            async {
                Json(json!({
                    "data": [
                        { "id": "901", "type": "chapters",
                          "attributes": { "number": 1, "volumeNumber": 1, "length": 20 },
                          "relationships": {} },
                        { "id": "902", "type": "chapters",
                          "attributes": { "number": 2, "volumeNumber": 1, "length": 22 },
                          "relationships": {} }
                    ]
                }))
            }
        }),
    );
    let adapter = adapter_for(router).await;

    let chapters = adapter.fetch_chapters("38").await;

    let ids: Vec<&str> = chapters.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["901", "902"]);
    assert!(chapters.iter().all(|c| c.manga_id == "38"));
    assert_eq!(chapters[1].title, "Chapter 2");
    let query = seen_query.lock().unwrap().clone();
    assert!(query.contains("filter%5Bmanga_id%5D=38") || query.contains("filter[manga_id]=38"));
}

#[tokio::test]
async fn test_server_error_yields_empty_chapters() {
    let router = Router::new().route(
        "/chapters",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let adapter = adapter_for(router).await;

    assert!(adapter.fetch_chapters("38").await.is_empty());
}
