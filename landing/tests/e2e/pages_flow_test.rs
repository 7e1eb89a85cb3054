//! ページ配信E2Eテスト

use reqwest::{Client, StatusCode};

use crate::support;
use support::http::spawn_landing;

#[tokio::test]
async fn every_page_renders_with_title() {
    let server = spawn_landing(support::unconnected_state(100, false)).await;
    let client = Client::new();

    let pages = [
        ("/", "Home - kivtechs.cloud"),
        ("/terms", "Terms &amp; Conditions - kivtechs.cloud"),
        ("/privacy", "Privacy Policy - kivtechs.cloud"),
        ("/aimodels", "AI Models - kivtechs.cloud"),
        ("/aiproducts", "AI Products - kivtechs.cloud"),
        ("/support", "Support - kivtechs.cloud"),
        ("/pricing", "Pricing &amp; Plans - kivtechs.cloud"),
    ];
    for (path, title) in pages {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{}", path);
        let body = res.text().await.unwrap();
        assert!(body.contains(&format!("<title>{}</title>", title)), "{}", path);
    }

    server.stop().await;
}

#[tokio::test]
async fn unknown_path_returns_404_page() {
    let server = spawn_landing(support::unconnected_state(100, false)).await;

    let res = Client::new()
        .get(server.url("/nonexistent-path"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.text().await.unwrap();
    assert!(body.contains("Sorry, the page \"/nonexistent-path\" does not exist."));

    server.stop().await;
}
