//! Tests for the remote search API client against a mock server.

use std::time::Duration;

use reddit_archive_browser::search_api::{PostSearchRequest, SearchApiClient, SearchApiError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_request<'a>(query: &'a str) -> PostSearchRequest<'a> {
    PostSearchRequest {
        query,
        sort: "most_upvotes",
        search_type: "post_title",
        page: 1,
        limit: 20,
        start_date: None,
        end_date: None,
    }
}

fn result_json() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "id": "abc123",
            "title": "A matching post",
            "selftext": "body",
            "author": "poster",
            "subreddit": "archived",
            "created_utc": 1_500_000_000_i64,
            "score": 42,
            "num_comments": 7
        }],
        "total": 1,
        "page": 1,
        "limit": 20
    })
}

#[tokio::test]
async fn test_search_posts_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/posts"))
        .and(query_param("query", "bag"))
        .and(query_param("sort", "most_upvotes"))
        .and(query_param("search_type", "post_title"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(result_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = SearchApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let page = client.search_posts(&sample_request("bag")).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].id, "abc123");
    assert_eq!(page.results[0].score, 42);
}

#[tokio::test]
async fn test_search_posts_sends_date_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/posts"))
        .and(query_param("start_date", "2019-01-01"))
        .and(query_param("end_date", "2019-12-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [],
            "total": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SearchApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let mut request = sample_request("bag");
    request.start_date = Some("2019-01-01");
    request.end_date = Some("2019-12-31");

    let page = client.search_posts(&request).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn test_search_posts_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/posts"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = SearchApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let err = client.search_posts(&sample_request("bag")).await.unwrap_err();

    match err {
        SearchApiError::Status { status } => assert_eq!(status, 502),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_posts_undecodable_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = SearchApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let err = client.search_posts(&sample_request("bag")).await.unwrap_err();

    assert!(matches!(err, SearchApiError::Decode(_)));
}
