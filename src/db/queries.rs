use anyhow::{Context, Result};
use sqlx::SqlitePool;

use super::models::{
    Comment, CommentSortBy, DateRange, NewComment, NewSubmission, PostSortBy, SearchScope,
    Submission,
};
use crate::db::fts;
use crate::ids;
use crate::util::normalize_query;

// ========== Loading ==========

/// Insert a submission into the archive.
pub async fn insert_submission(pool: &SqlitePool, submission: &NewSubmission) -> Result<()> {
    sqlx::query(
        r"
        INSERT INTO submissions (id, title, selftext, author, subreddit, created_utc, score, num_comments)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(ids::clean(&submission.id))
    .bind(&submission.title)
    .bind(&submission.selftext)
    .bind(&submission.author)
    .bind(&submission.subreddit)
    .bind(submission.created_utc)
    .bind(submission.score)
    .bind(submission.num_comments)
    .execute(pool)
    .await
    .context("Failed to insert submission")?;

    Ok(())
}

/// Insert a comment into the archive.
pub async fn insert_comment(pool: &SqlitePool, comment: &NewComment) -> Result<()> {
    sqlx::query(
        r"
        INSERT INTO comments (id, submission_id, parent_id, author, body, subreddit, created_utc, score)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(ids::clean(&comment.id))
    .bind(ids::post_fullname(&comment.submission_id))
    .bind(&comment.parent_id)
    .bind(&comment.author)
    .bind(&comment.body)
    .bind(&comment.subreddit)
    .bind(comment.created_utc)
    .bind(comment.score)
    .execute(pool)
    .await
    .context("Failed to insert comment")?;

    Ok(())
}

// ========== Post listings ==========

/// Total number of submissions in the archive.
pub async fn count_submissions(pool: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM submissions")
        .fetch_one(pool)
        .await
        .context("Failed to count submissions")
}

/// One page of submissions in the given sort order.
pub async fn get_submissions(
    pool: &SqlitePool,
    sort: PostSortBy,
    limit: i64,
    offset: i64,
) -> Result<Vec<Submission>> {
    let sql = format!(
        "SELECT * FROM submissions ORDER BY {} LIMIT ? OFFSET ?",
        sort.sql_order()
    );
    sqlx::query_as(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to fetch submissions")
}

/// Fetch a submission by id (bare or fullname form).
pub async fn get_submission(pool: &SqlitePool, id: &str) -> Result<Option<Submission>> {
    sqlx::query_as("SELECT * FROM submissions WHERE id = ?")
        .bind(ids::clean(id))
        .fetch_optional(pool)
        .await
        .context("Failed to fetch submission")
}

/// Whether a submission exists in the archive.
pub async fn submission_exists(pool: &SqlitePool, id: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE id = ?")
        .bind(ids::clean(id))
        .fetch_one(pool)
        .await
        .context("Failed to check submission existence")?;
    Ok(count > 0)
}

/// All comments for a post in the given sort order.
///
/// The sort decides sibling order in the rebuilt thread, so it is applied
/// here rather than re-derived later.
pub async fn get_comments_for_submission(
    pool: &SqlitePool,
    post_id: &str,
    sort: CommentSortBy,
) -> Result<Vec<Comment>> {
    let sql = format!(
        "SELECT * FROM comments WHERE submission_id = ? ORDER BY {}",
        sort.sql_order()
    );
    sqlx::query_as(&sql)
        .bind(ids::post_fullname(post_id))
        .fetch_all(pool)
        .await
        .context("Failed to fetch comments for submission")
}

// ========== Exact (substring) search ==========

fn exact_submission_clause(scope: SearchScope) -> &'static str {
    match scope {
        SearchScope::PostTitle => "LOWER(title) LIKE ?",
        SearchScope::PostBody => "LOWER(selftext) LIKE ?",
        _ => "LOWER(title || ' ' || selftext) LIKE ?",
    }
}

fn like_pattern(query: &str) -> String {
    format!("%{}%", normalize_query(query))
}

/// One page of submissions whose scoped text contains the query verbatim
/// (case-insensitive, whitespace-normalized).
pub async fn search_submissions_exact(
    pool: &SqlitePool,
    query: &str,
    scope: SearchScope,
    sort: PostSortBy,
    range: DateRange,
    limit: i64,
    offset: i64,
) -> Result<Vec<Submission>> {
    let (after, before) = range.bounds();
    let sql = format!(
        "SELECT * FROM submissions
         WHERE {} AND created_utc >= ? AND created_utc <= ?
         ORDER BY {} LIMIT ? OFFSET ?",
        exact_submission_clause(scope),
        sort.sql_order()
    );
    sqlx::query_as(&sql)
        .bind(like_pattern(query))
        .bind(after)
        .bind(before)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to search submissions (exact)")
}

/// Total matches for [`search_submissions_exact`].
pub async fn count_submissions_exact(
    pool: &SqlitePool,
    query: &str,
    scope: SearchScope,
    range: DateRange,
) -> Result<i64> {
    let (after, before) = range.bounds();
    let sql = format!(
        "SELECT COUNT(*) FROM submissions
         WHERE {} AND created_utc >= ? AND created_utc <= ?",
        exact_submission_clause(scope)
    );
    sqlx::query_scalar(&sql)
        .bind(like_pattern(query))
        .bind(after)
        .bind(before)
        .fetch_one(pool)
        .await
        .context("Failed to count submissions (exact)")
}

/// One page of comments whose body contains the query verbatim.
pub async fn search_comments_exact(
    pool: &SqlitePool,
    query: &str,
    sort: PostSortBy,
    range: DateRange,
    limit: i64,
    offset: i64,
) -> Result<Vec<Comment>> {
    let (after, before) = range.bounds();
    let sql = format!(
        "SELECT * FROM comments
         WHERE LOWER(body) LIKE ? AND created_utc >= ? AND created_utc <= ?
         ORDER BY {} LIMIT ? OFFSET ?",
        comment_search_order(sort)
    );
    sqlx::query_as(&sql)
        .bind(like_pattern(query))
        .bind(after)
        .bind(before)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to search comments (exact)")
}

/// Total matches for [`search_comments_exact`].
pub async fn count_comments_exact(
    pool: &SqlitePool,
    query: &str,
    range: DateRange,
) -> Result<i64> {
    let (after, before) = range.bounds();
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM comments
         WHERE LOWER(body) LIKE ? AND created_utc >= ? AND created_utc <= ?",
    )
    .bind(like_pattern(query))
    .bind(after)
    .bind(before)
    .fetch_one(pool)
    .await
    .context("Failed to count comments (exact)")
}

// Comments have no num_comments column; a post-level sort on it falls back
// to score so search pages can share one sort selector.
fn comment_search_order(sort: PostSortBy) -> &'static str {
    match sort {
        PostSortBy::MostComments => PostSortBy::MostUpvotes.sql_order(),
        other => other.sql_order(),
    }
}

// ========== Full-text search ==========

fn submission_fts_column(scope: SearchScope) -> Option<&'static str> {
    match scope {
        SearchScope::PostTitle => Some("title"),
        SearchScope::PostBody => Some("selftext"),
        _ => None,
    }
}

/// One page of submissions matching the query via FTS5, best match first.
pub async fn search_submissions_fts(
    pool: &SqlitePool,
    query: &str,
    scope: SearchScope,
    sort: PostSortBy,
    range: DateRange,
    limit: i64,
    offset: i64,
) -> Result<Vec<Submission>> {
    let match_expr = fts::match_query(query, submission_fts_column(scope));
    if match_expr.is_empty() {
        return Ok(Vec::new());
    }
    let (after, before) = range.bounds();
    let sql = format!(
        "SELECT s.* FROM submissions s
         JOIN submissions_fts ON submissions_fts.rowid = s.rowid
         WHERE submissions_fts MATCH ?
           AND s.created_utc >= ? AND s.created_utc <= ?
         ORDER BY rank, s.{} LIMIT ? OFFSET ?",
        sort.sql_order()
    );
    sqlx::query_as(&sql)
        .bind(match_expr)
        .bind(after)
        .bind(before)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to search submissions (FTS)")
}

/// Total matches for [`search_submissions_fts`].
pub async fn count_submissions_fts(
    pool: &SqlitePool,
    query: &str,
    scope: SearchScope,
    range: DateRange,
) -> Result<i64> {
    let match_expr = fts::match_query(query, submission_fts_column(scope));
    if match_expr.is_empty() {
        return Ok(0);
    }
    let (after, before) = range.bounds();
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM submissions s
         JOIN submissions_fts ON submissions_fts.rowid = s.rowid
         WHERE submissions_fts MATCH ?
           AND s.created_utc >= ? AND s.created_utc <= ?",
    )
    .bind(match_expr)
    .bind(after)
    .bind(before)
    .fetch_one(pool)
    .await
    .context("Failed to count submissions (FTS)")
}

/// One page of comments matching the query via FTS5, best match first.
pub async fn search_comments_fts(
    pool: &SqlitePool,
    query: &str,
    sort: PostSortBy,
    range: DateRange,
    limit: i64,
    offset: i64,
) -> Result<Vec<Comment>> {
    let match_expr = fts::match_query(query, None);
    if match_expr.is_empty() {
        return Ok(Vec::new());
    }
    let (after, before) = range.bounds();
    let sql = format!(
        "SELECT c.* FROM comments c
         JOIN comments_fts ON comments_fts.rowid = c.rowid
         WHERE comments_fts MATCH ?
           AND c.created_utc >= ? AND c.created_utc <= ?
         ORDER BY rank, c.{} LIMIT ? OFFSET ?",
        comment_search_order(sort)
    );
    sqlx::query_as(&sql)
        .bind(match_expr)
        .bind(after)
        .bind(before)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to search comments (FTS)")
}

/// Total matches for [`search_comments_fts`].
pub async fn count_comments_fts(pool: &SqlitePool, query: &str, range: DateRange) -> Result<i64> {
    let match_expr = fts::match_query(query, None);
    if match_expr.is_empty() {
        return Ok(0);
    }
    let (after, before) = range.bounds();
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM comments c
         JOIN comments_fts ON comments_fts.rowid = c.rowid
         WHERE comments_fts MATCH ?
           AND c.created_utc >= ? AND c.created_utc <= ?",
    )
    .bind(match_expr)
    .bind(after)
    .bind(before)
    .fetch_one(pool)
    .await
    .context("Failed to count comments (FTS)")
}

// ========== User profiles ==========

/// Distinct authors (of posts or comments) whose name contains the query.
pub async fn search_users(pool: &SqlitePool, partial_name: &str) -> Result<Vec<String>> {
    let pattern = format!("%{}%", partial_name.trim());
    sqlx::query_scalar(
        r"
        SELECT DISTINCT author FROM (
            SELECT author FROM submissions WHERE author LIKE ?
            UNION
            SELECT author FROM comments WHERE author LIKE ?
        )
        ORDER BY author
        LIMIT 10
        ",
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await
    .context("Failed to search users")
}

/// One page of a user's submissions.
pub async fn get_user_submissions(
    pool: &SqlitePool,
    username: &str,
    sort: PostSortBy,
    limit: i64,
    offset: i64,
) -> Result<Vec<Submission>> {
    let sql = format!(
        "SELECT * FROM submissions WHERE author = ? ORDER BY {} LIMIT ? OFFSET ?",
        sort.sql_order()
    );
    sqlx::query_as(&sql)
        .bind(username)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to fetch user submissions")
}

/// Total submissions by a user.
pub async fn count_user_submissions(pool: &SqlitePool, username: &str) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE author = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .context("Failed to count user submissions")
}

/// One page of a user's comments.
pub async fn get_user_comments(
    pool: &SqlitePool,
    username: &str,
    sort: PostSortBy,
    limit: i64,
    offset: i64,
) -> Result<Vec<Comment>> {
    let sql = format!(
        "SELECT * FROM comments WHERE author = ? ORDER BY {} LIMIT ? OFFSET ?",
        comment_search_order(sort)
    );
    sqlx::query_as(&sql)
        .bind(username)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("Failed to fetch user comments")
}

/// Total comments by a user.
pub async fn count_user_comments(pool: &SqlitePool, username: &str) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE author = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .context("Failed to count user comments")
}

// ========== Misc ==========

/// Earliest and latest `created_utc` across posts and comments, for the
/// search date pickers. `None` when the archive is empty.
pub async fn get_date_bounds(pool: &SqlitePool) -> Result<Option<(i64, i64)>> {
    let row: (Option<i64>, Option<i64>) = sqlx::query_as(
        r"
        SELECT MIN(created_utc), MAX(created_utc) FROM (
            SELECT created_utc FROM submissions
            UNION ALL
            SELECT created_utc FROM comments
        )
        ",
    )
    .fetch_one(pool)
    .await
    .context("Failed to fetch date bounds")?;

    Ok(row.0.zip(row.1))
}
