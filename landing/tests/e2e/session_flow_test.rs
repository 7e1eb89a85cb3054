//! セッション識別子E2Eテスト

use reqwest::{header, Client, StatusCode};

use crate::support;
use support::http::spawn_landing;

fn cookie_value(set_cookie: &str) -> &str {
    set_cookie
        .strip_prefix("visitor_id=")
        .and_then(|rest| rest.split(';').next())
        .expect("visitor_id cookie")
}

#[tokio::test]
async fn first_visit_sets_cookie_and_return_visit_reuses_it() {
    let server = spawn_landing(support::unconnected_state(100, false)).await;
    let client = Client::new();

    let first = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let cookies: Vec<String> = first
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].contains("HttpOnly"));
    assert!(cookies[0].contains("Path=/"));
    assert!(!cookies[0].contains("Secure"));

    let session_id = cookie_value(&cookies[0]).to_string();
    let uuid = uuid::Uuid::parse_str(&session_id).unwrap();
    assert_eq!(uuid.get_version_num(), 7);
    let body = first.text().await.unwrap();
    assert!(body.contains(&session_id));

    let second = client
        .get(server.url("/pricing"))
        .header(header::COOKIE, format!("visitor_id={}", session_id))
        .send()
        .await
        .unwrap();
    assert!(second.headers().get(header::SET_COOKIE).is_none());
    assert!(second.text().await.unwrap().contains(&session_id));

    server.stop().await;
}

#[tokio::test]
async fn malformed_cookie_is_replaced() {
    let server = spawn_landing(support::unconnected_state(100, false)).await;

    let res = Client::new()
        .get(server.url("/support"))
        .header(header::COOKIE, "visitor_id=not-a-uuid")
        .send()
        .await
        .unwrap();
    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .expect("replacement cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert_ne!(cookie_value(&set_cookie), "not-a-uuid");

    server.stop().await;
}
