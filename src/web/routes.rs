use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use super::pages::home::{render_home_page, HomePageParams};
use super::pages::post::{render_post_page, PostPageParams};
use super::pages::profile::{
    render_profile_page, render_user_search_page, ProfilePageParams, ProfileTab,
};
use super::pages::search::{render_search_page, CommentHit, SearchPageParams};
use super::AppState;
use crate::comment_tree::{build_tree, highlighted_chain};
use crate::db::{
    count_comments_exact, count_comments_fts, count_submissions, count_submissions_exact,
    count_submissions_fts, count_user_comments, count_user_submissions,
    get_comments_for_submission, get_submission, get_submissions, get_user_comments,
    get_user_submissions, search_comments_exact, search_comments_fts, search_submissions_exact,
    search_submissions_fts, search_users, submission_exists, Comment, CommentSortBy, DateRange,
    PostSortBy, SearchScope, Submission,
};
use crate::ids;
use crate::search_api::PostSearchRequest;
use crate::util::normalize_query;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/post/:id", get(post_view))
        .route("/search", get(search))
        .route("/user", get(user_search))
        .route("/user/:username", get(user_profile))
        .route("/api/posts", get(api_posts))
        .route("/healthz", get(health))
}

/// Parse an on/off query flag with a default for when it is absent.
fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value.map(str::trim) {
        Some("0" | "false" | "off" | "no") => false,
        Some("1" | "true" | "on" | "yes") => true,
        _ => default,
    }
}

/// Number of pages needed for `total` rows, zero when there are none.
fn page_count(total: i64, page_size: i64) -> usize {
    if total <= 0 {
        0
    } else {
        ((total - 1) / page_size + 1) as usize
    }
}

// ========== HTML Routes ==========

#[derive(Debug, Deserialize)]
struct HomeParams {
    page: Option<usize>,
    sort: Option<String>,
}

async fn home(State(state): State<AppState>, Query(params): Query<HomeParams>) -> Response {
    let sort = PostSortBy::from_str(params.sort.as_deref().unwrap_or_default());
    let page = params.page.unwrap_or(0);
    let page_size = state.config.page_size;
    let offset = page as i64 * page_size;

    let total = match count_submissions(state.db.pool()).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to count submissions: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let posts = match get_submissions(state.db.pool(), sort, page_size, offset).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Failed to fetch submissions: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    render_home_page(&HomePageParams {
        posts: &posts,
        sort,
        page,
        total_pages: page_count(total, page_size),
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
struct PostViewParams {
    comment_id: Option<String>,
    sort: Option<String>,
    /// Highlight the target comment ("1"/"0", default on)
    highlight: Option<String>,
    /// Bring the highlighted thread to the top (default on)
    top: Option<String>,
}

async fn post_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<PostViewParams>,
) -> Response {
    let post = match get_submission(state.db.pool(), &id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, "Post not found").into_response();
        }
        Err(e) => {
            tracing::error!("Failed to fetch submission: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let sort = CommentSortBy::from_str(params.sort.as_deref().unwrap_or_default());
    let comments = match get_comments_for_submission(state.db.pool(), &post.id, sort).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to fetch comments: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let tree = build_tree(&post.id, &comments);

    let highlight = parse_flag(params.highlight.as_deref(), true);
    let bring_to_top = parse_flag(params.top.as_deref(), true);
    let highlight_id = params
        .comment_id
        .as_deref()
        .filter(|cid| highlight && !cid.is_empty());

    // An unknown target degrades to the plain listing
    let chain = highlight_id
        .filter(|_| bring_to_top)
        .map(|cid| highlighted_chain(&post.id, &tree, cid))
        .filter(|chain| !chain.is_empty());

    render_post_page(&PostPageParams {
        post: &post,
        tree: &tree,
        chain: chain.as_ref(),
        sort,
        highlight_id,
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    scope: Option<String>,
    exact: Option<String>,
    sort: Option<String>,
    page: Option<usize>,
    after: Option<String>,
    before: Option<String>,
    /// Highlight matched terms in results (default on)
    hl: Option<String>,
    /// "db" (default) or "api" for the remote fast search
    method: Option<String>,
}

/// Parse a `YYYY-MM-DD` date filter into an inclusive timestamp bound.
fn parse_date_bound(value: Option<&str>, end_of_day: bool) -> Option<i64> {
    let date = NaiveDate::parse_from_str(value?.trim(), "%Y-%m-%d").ok()?;
    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59)?
    } else {
        date.and_hms_opt(0, 0, 0)?
    };
    Some(time.and_utc().timestamp())
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let query = params.q.as_deref().unwrap_or("").trim().to_string();
    let scope = SearchScope::from_str(params.scope.as_deref().unwrap_or_default());
    let sort = PostSortBy::from_str(params.sort.as_deref().unwrap_or_default());
    let exact = parse_flag(params.exact.as_deref(), false);
    let highlight = parse_flag(params.hl.as_deref(), true);
    let page = params.page.unwrap_or(0);
    let page_size = state.config.page_size;
    let offset = page as i64 * page_size;

    let range = DateRange {
        after: parse_date_bound(params.after.as_deref(), false),
        before: parse_date_bound(params.before.as_deref(), true),
    };

    let api_available = state.search_api.is_some();
    let want_api = params.method.as_deref() == Some("api");

    let terms: Vec<String> = if highlight && !query.is_empty() {
        normalize_query(&query)
            .split_whitespace()
            .map(String::from)
            .collect()
    } else {
        Vec::new()
    };

    let mut posts: Vec<Submission> = Vec::new();
    let mut comments: Vec<Comment> = Vec::new();
    let mut total: i64 = 0;
    let mut used_api = false;
    let mut api_error: Option<String> = None;

    if !query.is_empty() {
        // Fast path: remote search API covers post scopes only
        if want_api && scope.includes_posts() {
            if let Some(client) = &state.search_api {
                let request = PostSearchRequest {
                    query: &query,
                    sort: sort.as_str(),
                    search_type: scope.as_str(),
                    page: page as u32 + 1,
                    limit: page_size as u32,
                    start_date: params.after.as_deref(),
                    end_date: params.before.as_deref(),
                };
                match client.search_posts(&request).await {
                    Ok(api_page) => {
                        posts = api_page.results;
                        total = api_page.total;
                        used_api = true;
                    }
                    Err(e) => {
                        tracing::error!("Search API request failed: {e}");
                        api_error = Some(e.to_string());
                    }
                }
            }
        }

        if !used_api {
            match run_db_search(&state, &query, scope, exact, sort, range, page_size, offset).await
            {
                Ok(results) => {
                    posts = results.0;
                    comments = results.1;
                    total = results.2;
                }
                Err(e) => {
                    tracing::error!("Search failed: {e}");
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Search error").into_response();
                }
            }
        }
    }

    // Comment hits only link to their thread when the post survived into
    // the archive
    let mut hits: Vec<CommentHit<'_>> = Vec::with_capacity(comments.len());
    for comment in &comments {
        let post_exists = submission_exists(state.db.pool(), ids::clean(&comment.submission_id))
            .await
            .unwrap_or(false);
        hits.push(CommentHit {
            comment,
            post_exists,
        });
    }

    render_search_page(&SearchPageParams {
        query: &query,
        scope,
        exact,
        sort,
        api_available,
        used_api,
        api_error: api_error.as_deref(),
        posts: &posts,
        comments: &hits,
        page,
        total_pages: page_count(total, page_size),
        total_results: total,
        terms: &terms,
        after: params.after.as_deref().filter(|s| !s.is_empty()),
        before: params.before.as_deref().filter(|s| !s.is_empty()),
    })
    .into_response()
}

/// Run the database search for the requested scope, returning matching
/// posts, matching comments, and the combined total. Exact mode uses
/// case-insensitive substring matching; otherwise FTS.
#[allow(clippy::too_many_arguments)]
async fn run_db_search(
    state: &AppState,
    query: &str,
    scope: SearchScope,
    exact: bool,
    sort: PostSortBy,
    range: DateRange,
    page_size: i64,
    offset: i64,
) -> anyhow::Result<(Vec<Submission>, Vec<Comment>, i64)> {
    let pool = state.db.pool();
    let mut posts = Vec::new();
    let mut comments = Vec::new();
    let mut total = 0;

    if scope.includes_posts() {
        if exact {
            posts =
                search_submissions_exact(pool, query, scope, sort, range, page_size, offset)
                    .await?;
            total += count_submissions_exact(pool, query, scope, range).await?;
        } else {
            posts =
                search_submissions_fts(pool, query, scope, sort, range, page_size, offset).await?;
            total += count_submissions_fts(pool, query, scope, range).await?;
        }
    }
    if scope.includes_comments() {
        if exact {
            comments = search_comments_exact(pool, query, sort, range, page_size, offset).await?;
            total += count_comments_exact(pool, query, range).await?;
        } else {
            comments = search_comments_fts(pool, query, sort, range, page_size, offset).await?;
            total += count_comments_fts(pool, query, range).await?;
        }
    }

    Ok((posts, comments, total))
}

#[derive(Debug, Deserialize)]
struct UserSearchParams {
    q: Option<String>,
}

async fn user_search(
    State(state): State<AppState>,
    Query(params): Query<UserSearchParams>,
) -> Response {
    let query = params.q.as_deref().unwrap_or("").trim().to_string();

    let users = if query.is_empty() {
        Vec::new()
    } else {
        match search_users(state.db.pool(), &query).await {
            Ok(u) => u,
            Err(e) => {
                tracing::error!("Failed to search users: {e}");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
            }
        }
    };

    render_user_search_page(&query, &users).into_response()
}

#[derive(Debug, Deserialize)]
struct ProfileParams {
    tab: Option<String>,
    sort: Option<String>,
    page: Option<usize>,
}

async fn user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<ProfileParams>,
) -> Response {
    let tab = ProfileTab::from_str(params.tab.as_deref().unwrap_or_default());
    let sort = PostSortBy::from_str(params.sort.as_deref().unwrap_or("newest"));
    let page = params.page.unwrap_or(0);
    let page_size = state.config.page_size;
    let offset = page as i64 * page_size;
    let pool = state.db.pool();

    let (post_count, comment_count) = match (
        count_user_submissions(pool, &username).await,
        count_user_comments(pool, &username).await,
    ) {
        (Ok(p), Ok(c)) => (p, c),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("Failed to count user activity: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let mut posts = Vec::new();
    let mut comments = Vec::new();
    let total = match tab {
        ProfileTab::Posts => {
            posts = match get_user_submissions(pool, &username, sort, page_size, offset).await {
                Ok(p) => p,
                Err(e) => {
                    tracing::error!("Failed to fetch user submissions: {e}");
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
                }
            };
            post_count
        }
        ProfileTab::Comments => {
            comments = match get_user_comments(pool, &username, sort, page_size, offset).await {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!("Failed to fetch user comments: {e}");
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
                }
            };
            comment_count
        }
    };

    render_profile_page(&ProfilePageParams {
        username: &username,
        tab,
        sort,
        page,
        total_pages: page_count(total, page_size),
        post_count,
        comment_count,
        posts: &posts,
        comments: &comments,
    })
    .into_response()
}

// ========== JSON Routes ==========

#[derive(Debug, Deserialize)]
struct ApiPostsParams {
    page: Option<u32>,
    per_page: Option<u32>,
    sort: Option<String>,
}

async fn api_posts(
    State(state): State<AppState>,
    Query(params): Query<ApiPostsParams>,
) -> Response {
    let sort = PostSortBy::from_str(params.sort.as_deref().unwrap_or_default());
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).min(100);
    let offset = i64::from(page - 1) * i64::from(per_page);

    let total = match count_submissions(state.db.pool()).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to count submissions: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let posts =
        match get_submissions(state.db.pool(), sort, i64::from(per_page), offset).await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("Failed to fetch submissions: {e}");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
            }
        };

    let response = serde_json::json!({
        "data": posts,
        "page": page,
        "per_page": per_page,
        "total": total,
    });

    Json(response).into_response()
}

async fn health() -> &'static str {
    "OK"
}
