//! Integration tests for thread reconstruction over stored comments.

use std::sync::Arc;

use reddit_archive_browser::comment_tree::{build_tree, highlighted_chain};
use reddit_archive_browser::db::{
    get_comments_for_submission, insert_comment, insert_submission, CommentSortBy, Database,
    NewComment, NewSubmission,
};
use tempfile::TempDir;

async fn setup_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (db, temp_dir)
}

async fn seed_post(db: &Database, id: &str) {
    insert_submission(
        db.pool(),
        &NewSubmission {
            id: id.to_string(),
            title: format!("Post {id}"),
            selftext: "post body".to_string(),
            author: "op".to_string(),
            subreddit: "archived".to_string(),
            created_utc: 1_500_000_000,
            score: 10,
            num_comments: 0,
        },
    )
    .await
    .expect("Failed to insert submission");
}

async fn seed_comment(db: &Database, id: &str, post: &str, parent: &str, score: i64, at: i64) {
    insert_comment(
        db.pool(),
        &NewComment {
            id: id.to_string(),
            submission_id: format!("t3_{post}"),
            parent_id: parent.to_string(),
            author: format!("author_{id}"),
            body: format!("body of {id}"),
            subreddit: "archived".to_string(),
            created_utc: at,
            score,
        },
    )
    .await
    .expect("Failed to insert comment");
}

#[tokio::test]
async fn test_tree_from_stored_comments_follows_score_order() {
    let (db, _temp_dir) = setup_test_db().await;
    seed_post(&db, "p1").await;

    // Two top-level comments, low scored first in insertion order
    seed_comment(&db, "low", "p1", "t3_p1", 1, 100).await;
    seed_comment(&db, "high", "p1", "t3_p1", 50, 200).await;
    seed_comment(&db, "reply", "p1", "t1_high", 3, 300).await;

    let comments = get_comments_for_submission(db.pool(), "p1", CommentSortBy::MostUpvotes)
        .await
        .unwrap();
    let tree = build_tree("p1", &comments);

    let order: Vec<(&str, usize)> = tree
        .iter()
        .map(|t| (t.comment.id.as_str(), t.depth))
        .collect();
    // Score sort puts "high" first; its reply nests before "low"
    assert_eq!(order, vec![("high", 0), ("reply", 1), ("low", 0)]);
}

#[tokio::test]
async fn test_tree_sibling_order_changes_with_sort() {
    let (db, _temp_dir) = setup_test_db().await;
    seed_post(&db, "p1").await;
    seed_comment(&db, "older", "p1", "t3_p1", 5, 100).await;
    seed_comment(&db, "newer", "p1", "t3_p1", 5, 200).await;

    let newest = get_comments_for_submission(db.pool(), "p1", CommentSortBy::Newest)
        .await
        .unwrap();
    let tree = build_tree("p1", &newest);
    assert_eq!(tree[0].comment.id, "newer");

    let oldest = get_comments_for_submission(db.pool(), "p1", CommentSortBy::Oldest)
        .await
        .unwrap();
    let tree = build_tree("p1", &oldest);
    assert_eq!(tree[0].comment.id, "older");
}

#[tokio::test]
async fn test_orphaned_comment_survives_round_trip() {
    let (db, _temp_dir) = setup_test_db().await;
    seed_post(&db, "p1").await;
    seed_comment(&db, "a", "p1", "t3_p1", 5, 100).await;
    // Parent comment was never archived
    seed_comment(&db, "stranded", "p1", "t1_deleted", 2, 200).await;

    let comments = get_comments_for_submission(db.pool(), "p1", CommentSortBy::MostUpvotes)
        .await
        .unwrap();
    let tree = build_tree("p1", &comments);

    assert_eq!(tree.len(), 2);
    let stranded = tree
        .iter()
        .find(|t| t.comment.id == "stranded")
        .expect("orphan must not be dropped");
    assert_eq!(stranded.depth, 0);
}

#[tokio::test]
async fn test_highlighted_chain_over_stored_thread() {
    let (db, _temp_dir) = setup_test_db().await;
    seed_post(&db, "p1").await;
    seed_comment(&db, "root", "p1", "t3_p1", 10, 100).await;
    seed_comment(&db, "mid", "p1", "t1_root", 8, 200).await;
    seed_comment(&db, "leaf", "p1", "t1_mid", 6, 300).await;
    seed_comment(&db, "other", "p1", "t3_p1", 4, 400).await;

    let comments = get_comments_for_submission(db.pool(), "p1", CommentSortBy::MostUpvotes)
        .await
        .unwrap();
    let tree = build_tree("p1", &comments);
    let chain = highlighted_chain("p1", &tree, "mid");

    let order: Vec<(&str, usize)> = chain
        .chain
        .iter()
        .map(|t| (t.comment.id.as_str(), t.depth))
        .collect();
    assert_eq!(order, vec![("root", 0), ("mid", 1), ("leaf", 2)]);
    assert!(!chain.included.contains("other"));
}

#[tokio::test]
async fn test_concurrent_builds_are_independent() {
    let (db, _temp_dir) = setup_test_db().await;
    seed_post(&db, "p1").await;
    seed_comment(&db, "a", "p1", "t3_p1", 5, 100).await;
    seed_comment(&db, "b", "p1", "t1_a", 4, 200).await;

    let comments = Arc::new(
        get_comments_for_submission(db.pool(), "p1", CommentSortBy::MostUpvotes)
            .await
            .unwrap(),
    );

    // The builder holds no shared state; concurrent invocations over the
    // same input must agree with each other and with a serial build.
    let mut handles = Vec::new();
    for _ in 0..8 {
        let comments = Arc::clone(&comments);
        handles.push(tokio::spawn(async move {
            let tree = build_tree("p1", &comments);
            tree.iter()
                .map(|t| (t.comment.id.clone(), t.depth))
                .collect::<Vec<_>>()
        }));
    }

    let expected: Vec<(String, usize)> = build_tree("p1", &comments)
        .iter()
        .map(|t| (t.comment.id.clone(), t.depth))
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), expected);
    }
}
