mod common;

use axum::http::StatusCode;
use common::{CODE_SPACE, TestOptions, code_of};
use std::time::Duration;
use wordlink::api::dto::shorten::ShortenResponse;
use wordlink::domain::entities::Table;

#[tokio::test]
async fn test_shorten_creates_word_code() {
    let (state, store) = common::create_test_state(TestOptions::default());
    let server = common::test_server(state);

    let response = server
        .post("/shorten")
        .form(&[("longurl", "http://example.com")])
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body = response.json::<ShortenResponse>();
    assert_eq!(body.longurl, "http://example.com");
    assert!(CODE_SPACE.contains(&code_of(&body.shorturl)));
    assert_eq!(store.table_len(Table::LongToShort), 1);
    assert_eq!(store.table_len(Table::ShortToLong), 1);
}

#[tokio::test]
async fn test_shorten_is_idempotent() {
    let (state, store) = common::create_test_state(TestOptions::default());
    let server = common::test_server(state);

    let first = server
        .post("/shorten")
        .form(&[("longurl", "http://example.com")])
        .await;
    let second = server
        .post("/shorten")
        .form(&[("longurl", "http://example.com")])
        .await;

    assert_eq!(first.status_code(), StatusCode::CREATED);
    assert_eq!(second.status_code(), StatusCode::OK);
    assert_eq!(
        first.json::<ShortenResponse>().shorturl,
        second.json::<ShortenResponse>().shorturl
    );
    assert_eq!(store.table_len(Table::ShortToLong), 1);
}

#[tokio::test]
async fn test_shorten_accepts_query_parameter() {
    let (state, _store) = common::create_test_state(TestOptions::default());
    let server = common::test_server(state);

    let response = server
        .get("/shorten")
        .add_query_param("longurl", "https://example.com/a?b=c")
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        response.json::<ShortenResponse>().longurl,
        "https://example.com/a?b=c"
    );
}

#[tokio::test]
async fn test_form_body_wins_over_query() {
    let (state, _store) = common::create_test_state(TestOptions::default());
    let server = common::test_server(state);

    let response = server
        .post("/shorten")
        .add_query_param("longurl", "https://query.example")
        .form(&[("longurl", "https://body.example")])
        .await;

    assert_eq!(
        response.json::<ShortenResponse>().longurl,
        "https://body.example"
    );
}

#[tokio::test]
async fn test_shorten_missing_longurl() {
    let (state, store) = common::create_test_state(TestOptions::default());
    let server = common::test_server(state);

    let response = server.post("/shorten").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "missing_parameter");
    assert_eq!(
        json["error"]["message"],
        "Expected parameter longurl not found"
    );
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(store.table_len(Table::LongToShort), 0);
}

#[tokio::test]
async fn test_shorten_empty_longurl_is_missing() {
    let (state, _store) = common::create_test_state(TestOptions::default());
    let server = common::test_server(state);

    let response = server.post("/shorten").form(&[("longurl", "")]).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_sets_cors_headers() {
    let (state, _store) = common::create_test_state(TestOptions::default());
    let server = common::test_server(state);

    let response = server
        .post("/shorten")
        .form(&[("longurl", "http://example.com")])
        .await;

    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(
        response.header("access-control-allow-headers"),
        "Origin, X-Requested-With, Content-Type, Accept"
    );
}

#[tokio::test]
async fn test_shorten_rate_limited() {
    let (state, _store) = common::create_test_state(TestOptions {
        rate_limit: 2,
        window: Duration::from_secs(60),
        ..TestOptions::default()
    });
    let server = common::test_server(state);

    for url in ["https://a.example", "https://b.example"] {
        let response = server.post("/shorten").form(&[("longurl", url)]).await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let response = server
        .post("/shorten")
        .form(&[("longurl", "https://c.example")])
        .await;

    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);

    let retry_after: u64 = response
        .header("retry-after")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0 && retry_after <= 60);

    let json = response.json::<serde_json::Value>();
    let message = json["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("You've sent too many requests in a short span of time."));
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_missing_param_does_not_count_against_limit() {
    let (state, _store) = common::create_test_state(TestOptions {
        rate_limit: 1,
        ..TestOptions::default()
    });
    let server = common::test_server(state);

    let rejected = server.post("/shorten").await;
    assert_eq!(rejected.status_code(), StatusCode::BAD_REQUEST);

    let accepted = server
        .post("/shorten")
        .form(&[("longurl", "https://example.com")])
        .await;
    assert_eq!(accepted.status_code(), StatusCode::CREATED);
}
