mod common;

use axum::http::StatusCode;
use common::{TestOptions, code_of};
use wordlink::api::dto::shorten::ShortenResponse;
use wordlink::domain::entities::Table;
use wordlink::domain::repositories::KeyValueStore;

#[tokio::test]
async fn test_redirect_generated_code() {
    let (state, _store) = common::create_test_state(TestOptions::default());
    let server = common::test_server(state);

    let created = server
        .post("/shorten")
        .form(&[("longurl", "https://example.com/target")])
        .await
        .json::<ShortenResponse>();

    let response = server.get(&format!("/{}", code_of(&created.shorturl))).await;

    assert_eq!(response.status_code(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_prefers_generated_over_custom() {
    let (state, store) = common::create_test_state(TestOptions::default());
    store
        .set(Table::ShortToLong, "redcat", "https://generated.example")
        .await
        .unwrap();
    store
        .set(Table::CustomToLong, "redcat", "https://custom.example")
        .await
        .unwrap();
    let server = common::test_server(state);

    let response = server.get("/redcat").await;

    assert_eq!(response.header("location"), "https://generated.example");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _store) = common::create_test_state(TestOptions::default());
    let server = common::test_server(state);

    let response = server.get("/nonexistent").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["code"], "nonexistent");
}

#[tokio::test]
async fn test_redirect_has_no_cors_headers() {
    let (state, store) = common::create_test_state(TestOptions::default());
    store
        .set(Table::ShortToLong, "bluedog", "https://example.com")
        .await
        .unwrap();
    let server = common::test_server(state);

    let response = server.get("/bluedog").await;

    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn test_landing_page() {
    let (state, _store) = common::create_test_state(TestOptions::default());
    let server = common::test_server(state);

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let html = response.text();
    assert!(html.contains("Shorten!"));
    assert!(html.contains("http://s.test/shorten"));
}
