//! Highspot search client tests against a mock HTTP server
//!
//! Run with: cargo test --test search_tests

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use highspot_mcp::mcp::{build_registry, Registry, SearchContext};
use highspot_mcp::search::{Credentials, HighspotClient, SearchConfig, StaticCredentials};
use highspot_mcp::ServerError;

const SEARCH_PATH: &str = "/v1.0/search/items";

fn client_for(server: &MockServer) -> HighspotClient {
    let config = SearchConfig::with_base_url(format!("{}{}", server.uri(), SEARCH_PATH));
    HighspotClient::new(config).unwrap()
}

fn registry_for(server: &MockServer, credentials: StaticCredentials) -> Registry {
    let ctx = SearchContext::new(client_for(server), Arc::new(credentials));
    build_registry(Arc::new(ctx)).unwrap()
}

fn sample_body() -> serde_json::Value {
    json!({
        "collection": [
            {"id": "it_1", "title": "Pricing deck", "score": 0.92},
            {"id": "it_2", "title": "Competitive battlecard", "score": null}
        ],
        "counts_total": 2,
        "nested": {"keep": [1, 2.5, "three", true]}
    })
}

#[tokio::test]
async fn search_sends_fixed_parameters_and_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query-string", "pricing deck"))
        .and(query_param("start", "0"))
        .and(query_param("limit", "10"))
        .and(query_param("sortby", "relevancy"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server)
        .search("pricing deck", &Credentials::new("user", "pass"))
        .await
        .unwrap();

    // Passed through without reshaping
    assert_eq!(body, sample_body());
}

#[tokio::test]
async fn search_non_success_is_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search("anything", &Credentials::new("user", "wrong"))
        .await
        .unwrap_err();

    match err {
        ServerError::Remote {
            status,
            status_text,
        } => {
            assert_eq!(status, 401);
            assert_eq!(status_text, "Unauthorized");
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn search_timeout_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = SearchConfig {
        timeout: Some(Duration::from_millis(100)),
        ..SearchConfig::with_base_url(format!("{}{}", server.uri(), SEARCH_PATH))
    };
    let err = HighspotClient::new(config)
        .unwrap()
        .search("slow", &Credentials::new("user", "pass"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServerError::Http(_)));
}

#[tokio::test]
async fn search_tool_returns_pretty_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .mount(&server)
        .await;

    let envelope = registry_for(&server, StaticCredentials::new("user", "pass"))
        .call("searchHighspot", json!({"query": "pricing"}))
        .await
        .unwrap();

    assert!(!envelope.is_error());
    assert_eq!(envelope.content.len(), 1);
    let parsed: serde_json::Value = serde_json::from_str(envelope.texts()[0]).unwrap();
    assert_eq!(parsed, sample_body());
}

#[tokio::test]
async fn search_prompt_puts_preamble_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .mount(&server)
        .await;

    let envelope = registry_for(&server, StaticCredentials::new("user", "pass"))
        .call("search_highspot_prompt", json!({"query": "battlecard"}))
        .await
        .unwrap();

    let texts = envelope.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(
        texts[0],
        "Here are the Highspot search results for \"battlecard\":"
    );
    let parsed: serde_json::Value = serde_json::from_str(texts[1]).unwrap();
    assert_eq!(parsed, sample_body());
}

#[tokio::test]
async fn search_tool_remote_failure_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let envelope = registry_for(&server, StaticCredentials::new("user", "pass"))
        .call("searchHighspot", json!({"query": "pricing"}))
        .await
        .unwrap();

    assert!(envelope.is_error());
    assert_eq!(
        envelope.texts(),
        vec!["Highspot API error: 503 Service Unavailable"]
    );
}

#[tokio::test]
async fn missing_credentials_skip_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(0)
        .mount(&server)
        .await;

    for credentials in [
        StaticCredentials::default(),
        StaticCredentials::partial(Some("user"), None),
        StaticCredentials::partial(None, Some("pass")),
    ] {
        let envelope = registry_for(&server, credentials)
            .call("searchHighspot", json!({"query": "pricing"}))
            .await
            .unwrap();
        assert!(envelope.is_error());
        assert!(envelope.texts()[0].starts_with("Configuration error"));
    }
}

#[tokio::test]
async fn search_prompt_accepts_numeric_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("query-string", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = registry_for(&server, StaticCredentials::new("user", "pass"))
        .call("search_highspot_prompt", json!(42))
        .await
        .unwrap();

    assert!(!envelope.is_error());
    assert_eq!(
        envelope.texts()[0],
        "Here are the Highspot search results for \"42\":"
    );
}
