//! Search page for the web UI.

use maud::{html, Markup, PreEscaped, Render};
use urlencoding::encode;

use crate::components::{BaseLayout, EmptyState, Pagination, PostCard};
use crate::db::{Comment, PostSortBy, SearchScope, Submission};
use crate::ids;
use crate::util::{format_timestamp, highlight_terms};

/// A comment search result plus whether its parent post is in the archive
/// (dangling comments render without the post link).
#[derive(Debug, Clone)]
pub struct CommentHit<'a> {
    pub comment: &'a Comment,
    pub post_exists: bool,
}

/// Parameters for rendering the search page.
#[derive(Debug, Clone)]
pub struct SearchPageParams<'a> {
    /// The search query string (empty if no search performed)
    pub query: &'a str,
    pub scope: SearchScope,
    pub exact: bool,
    pub sort: PostSortBy,
    /// Whether a remote search API is configured at all
    pub api_available: bool,
    /// Whether this page of results came from the remote API
    pub used_api: bool,
    /// Error from the remote API, when it failed and the DB answered instead
    pub api_error: Option<&'a str>,
    pub posts: &'a [Submission],
    pub comments: &'a [CommentHit<'a>],
    /// Current page number (0-indexed)
    pub page: usize,
    pub total_pages: usize,
    pub total_results: i64,
    /// Terms to highlight in result text; empty disables highlighting
    pub terms: &'a [String],
    /// Raw `YYYY-MM-DD` date filters, echoed back into the form
    pub after: Option<&'a str>,
    pub before: Option<&'a str>,
}

/// Render the search page.
#[must_use]
pub fn render_search_page(params: &SearchPageParams<'_>) -> Markup {
    let content = html! {
        h1 { "Search Archive" }

        (SearchForm { params })

        @if let Some(error) = params.api_error {
            p class="api-error" {
                "Fast search failed (" (error) "); showing database results instead."
            }
        }

        @if !params.query.is_empty() {
            @if params.total_results == 0 {
                (EmptyState::no_results())
            } @else {
                p class="page-indicator" {
                    "Page " (params.page + 1) " of " (params.total_pages)
                    " (" (params.total_results) " results)"
                }

                @if !params.posts.is_empty() {
                    h2 { "Posts:" }
                    div class="post-list" {
                        @for post in params.posts {
                            (PostCard::new(post)
                                .with_title_markup(PreEscaped(highlight_terms(&post.title, params.terms)))
                                .with_body_markup(PreEscaped(highlight_terms(&post.selftext, params.terms))))
                        }
                    }
                }

                @if !params.comments.is_empty() {
                    h2 { "Search Results in Comments:" }
                    @for hit in params.comments {
                        (CommentHitCard { hit, terms: params.terms })
                    }
                }

                @if params.page + 1 >= params.total_pages {
                    p class="end-of-results" { "You have reached the end of the results." }
                }

                (search_pagination(params))
            }
        }
    };

    BaseLayout::new("Search").render(content)
}

fn search_pagination(params: &SearchPageParams<'_>) -> Pagination {
    Pagination::new(params.page, params.total_pages, "/search")
        .with_param("q", Some(params.query))
        .with_param("scope", Some(params.scope.as_str()))
        .with_param("exact", params.exact.then_some("1"))
        .with_param("sort", Some(params.sort.as_str()))
        .with_param("after", params.after)
        .with_param("before", params.before)
        .with_param("method", params.used_api.then_some("api"))
}

/// The search form.
#[derive(Debug)]
struct SearchForm<'a> {
    params: &'a SearchPageParams<'a>,
}

impl Render for SearchForm<'_> {
    fn render(&self) -> Markup {
        let params = self.params;
        let scopes = [
            SearchScope::PostTitle,
            SearchScope::PostBody,
            SearchScope::Comments,
            SearchScope::Everything,
        ];
        let sorts = [
            PostSortBy::MostUpvotes,
            PostSortBy::Newest,
            PostSortBy::Oldest,
        ];

        html! {
            form class="search-form" method="get" action="/search" {
                input
                    type="search"
                    name="q"
                    value=(params.query)
                    placeholder="Enter search term"
                    aria-label="Search term";

                div class="search-options" {
                    label {
                        "Search in: "
                        select name="scope" {
                            @for scope in scopes {
                                option value=(scope.as_str()) selected[scope == params.scope] {
                                    (scope.label())
                                }
                            }
                        }
                    }

                    label {
                        "Sort by: "
                        select name="sort" {
                            @for sort in sorts {
                                option value=(sort.as_str()) selected[sort == params.sort] {
                                    (sort.label())
                                }
                            }
                        }
                    }

                    label {
                        input type="checkbox" name="exact" value="1" checked[params.exact];
                        " Exact match"
                    }

                    label {
                        "From: "
                        input type="date" name="after" value=[params.after];
                    }
                    label {
                        "To: "
                        input type="date" name="before" value=[params.before];
                    }

                    @if params.api_available {
                        label {
                            "Method: "
                            select name="method" {
                                option value="db" selected[!params.used_api] { "Standard" }
                                option value="api" selected[params.used_api] { "Fast Search (Beta)" }
                            }
                        }
                    }
                }

                button type="submit" { "Search" }
            }
        }
    }
}

/// A card for one comment search result.
#[derive(Debug)]
struct CommentHitCard<'a> {
    hit: &'a CommentHit<'a>,
    terms: &'a [String],
}

impl Render for CommentHitCard<'_> {
    fn render(&self) -> Markup {
        let comment = self.hit.comment;
        let post_id = ids::clean(&comment.submission_id);
        let body = highlight_terms(&comment.body, self.terms).replace('\n', "<br>");

        html! {
            div class="comment" {
                p class="comment-meta" {
                    strong {
                        a href=(format!("/user/{}", encode(&comment.author))) {
                            "u/" (comment.author)
                        }
                    }
                    " - "
                    i {
                        "Score: " (comment.score)
                        " | Posted on: " (format_timestamp(comment.created_utc))
                        " in r/" (comment.subreddit)
                    }
                }
                p class="comment-body" { (PreEscaped(body)) }
                @if self.hit.post_exists {
                    a href=(format!(
                        "/post/{}?comment_id={}",
                        encode(post_id),
                        encode(&comment.id)
                    )) {
                        "View Full Post and Comments"
                    }
                }
            }
            hr;
        }
    }
}
