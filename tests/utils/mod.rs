//! Shared helpers for integration tests
#![allow(dead_code)]

pub mod fakes;

use axum::Router;
use manga_hub_lib::modules::provider::infrastructure::http_client::{
    RateLimitClient, RetryPolicy,
};
use reqwest::header::HeaderMap;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });

    format!("http://{}", addr)
}

/// Unpaced client without retries, so failures surface on the first attempt
pub fn test_client(name: &str) -> RateLimitClient {
    test_client_with_headers(name, HeaderMap::new())
}

pub fn test_client_with_headers(name: &str, headers: HeaderMap) -> RateLimitClient {
    RateLimitClient::new(
        name,
        Duration::ZERO,
        Duration::from_secs(5),
        RetryPolicy::none(),
        headers,
    )
    .expect("test client")
}
