//! 流量制限E2Eテスト

use reqwest::{header, Client, StatusCode};
use serde_json::Value;

use crate::support;
use support::http::spawn_landing;

#[tokio::test]
async fn hundred_and_first_request_is_rejected_per_client() {
    let server = spawn_landing(support::unconnected_state(100, true)).await;
    let client = Client::new();

    for i in 0..100 {
        let res = client
            .get(server.url("/"))
            .header("x-forwarded-for", "203.0.113.7")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "request {}", i + 1);
    }

    let rejected = client
        .get(server.url("/"))
        .header("x-forwarded-for", "203.0.113.7")
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = rejected.headers()[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0 && retry_after <= 900);
    let body: Value = rejected.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "status": "error",
            "message": "Too many requests from this IP, please try again later."
        })
    );

    let other = client
        .get(server.url("/"))
        .header("x-forwarded-for", "198.51.100.20, 10.0.0.1")
        .send()
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn forwarded_header_ignored_without_trust_proxy() {
    let server = spawn_landing(support::unconnected_state(1, false)).await;
    let client = Client::new();

    let first = client
        .get(server.url("/"))
        .header("x-forwarded-for", "203.0.113.1")
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    // 別のアドレスを名乗っても接続元で判定される
    let second = client
        .get(server.url("/"))
        .header("x-forwarded-for", "203.0.113.2")
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    server.stop().await;
}
