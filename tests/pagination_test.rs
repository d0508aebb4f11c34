//! Integration tests for pagination functionality.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use reddit_archive_browser::config::Config;
use reddit_archive_browser::db::{insert_submission, Database, NewSubmission};
use reddit_archive_browser::web::{create_app, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (db, temp_dir)
}

fn test_config() -> Config {
    Config {
        database_path: PathBuf::from("unused"),
        web_host: "127.0.0.1".to_string(),
        web_port: 0,
        page_size: 10,
        search_api_url: None,
        search_api_timeout: Duration::from_secs(5),
    }
}

fn create_test_app(db: Database) -> Router {
    let state = AppState {
        db,
        config: Arc::new(test_config()),
        search_api: None,
    };
    create_app(state)
}

async fn seed_posts(db: &Database, count: usize) {
    for i in 0..count {
        insert_submission(
            db.pool(),
            &NewSubmission {
                id: format!("post{i:03}"),
                title: format!("Post number {i}"),
                selftext: String::new(),
                author: "op".to_string(),
                subreddit: "archived".to_string(),
                created_utc: 1_500_000_000 + i as i64,
                score: i as i64,
                num_comments: 0,
            },
        )
        .await
        .expect("Failed to insert submission");
    }
}

async fn get_body(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_api_posts_pagination() {
    let (db, _temp_dir) = setup_test_db().await;
    seed_posts(&db, 25).await;
    let app = create_test_app(db);

    let (status, body) = get_body(&app, "/api/posts?page=1&per_page=10").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
    assert_eq!(json["total"], 25);
    assert_eq!(json["page"], 1);

    // Last page has the remainder
    let (_, body) = get_body(&app, "/api/posts?page=3&per_page=10").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"].as_array().unwrap().len(), 5);

    // Beyond the end is empty, not an error
    let (status, body) = get_body(&app, "/api/posts?page=9&per_page=10").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_api_posts_per_page_is_capped() {
    let (db, _temp_dir) = setup_test_db().await;
    seed_posts(&db, 3).await;
    let app = create_test_app(db);

    let (status, body) = get_body(&app, "/api/posts?per_page=5000").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["per_page"], 100);
}

#[tokio::test]
async fn test_home_page_pagination_links() {
    let (db, _temp_dir) = setup_test_db().await;
    // 3 pages at page_size 10
    seed_posts(&db, 25).await;
    let app = create_test_app(db);

    let (status, body) = get_body(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Page 1 of 3"));
    assert!(body.contains("page=1"));

    let (status, body) = get_body(&app, "/?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Page 3 of 3"));
    // Only 5 posts on the final page
    assert_eq!(body.matches("post-card").count(), 5);
}

#[tokio::test]
async fn test_home_page_sort_is_preserved_in_links() {
    let (db, _temp_dir) = setup_test_db().await;
    seed_posts(&db, 25).await;
    let app = create_test_app(db);

    let (status, body) = get_body(&app, "/?sort=oldest").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("sort=oldest"));
    // Oldest post first under this sort
    let first = body.find("Post number 0").unwrap();
    let later = body.find("Post number 9").unwrap();
    assert!(first < later);
}

#[tokio::test]
async fn test_home_page_empty_archive() {
    let (db, _temp_dir) = setup_test_db().await;
    let app = create_test_app(db);

    let (status, body) = get_body(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No posts found."));
}
