//! User profile pages: profile search and per-user post/comment listings.

use maud::{html, Markup, Render};
use urlencoding::encode;

use crate::components::{body_markup, BaseLayout, EmptyState, Pagination, PostList};
use crate::db::{Comment, PostSortBy, Submission};
use crate::ids;
use crate::util::format_timestamp;

/// Which profile tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Posts,
    Comments,
}

impl ProfileTab {
    /// Create from a URL parameter value.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s {
            "comments" => Self::Comments,
            _ => Self::Posts,
        }
    }

    /// The URL parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Comments => "comments",
        }
    }
}

/// Parameters for the profile page.
#[derive(Debug, Clone)]
pub struct ProfilePageParams<'a> {
    pub username: &'a str,
    pub tab: ProfileTab,
    pub sort: PostSortBy,
    pub page: usize,
    pub total_pages: usize,
    pub post_count: i64,
    pub comment_count: i64,
    /// Posts tab content (empty on the comments tab)
    pub posts: &'a [Submission],
    /// Comments tab content (empty on the posts tab)
    pub comments: &'a [Comment],
}

/// Render a user profile page.
#[must_use]
pub fn render_profile_page(params: &ProfilePageParams<'_>) -> Markup {
    let title = format!("u/{}", params.username);

    let content = html! {
        h1 { (title) }

        @if params.post_count == 0 && params.comment_count == 0 {
            (EmptyState::new("No posts or comments found for this user."))
        } @else {
            (TabNav { params })

            @match params.tab {
                ProfileTab::Posts => {
                    @if params.posts.is_empty() {
                        (EmptyState::new("No posts found."))
                    } @else {
                        (PostList::new(params.posts))
                    }
                }
                ProfileTab::Comments => {
                    @if params.comments.is_empty() {
                        (EmptyState::new("No comments found."))
                    } @else {
                        @for comment in params.comments {
                            (ProfileCommentCard { comment })
                        }
                    }
                }
            }

            (Pagination::new(
                params.page,
                params.total_pages,
                &format!("/user/{}", encode(params.username)),
            )
            .with_param("tab", Some(params.tab.as_str()))
            .with_param("sort", Some(params.sort.as_str())))
        }
    };

    BaseLayout::new(&title).render(content)
}

/// Tab navigation between a user's posts and comments.
#[derive(Debug)]
struct TabNav<'a> {
    params: &'a ProfilePageParams<'a>,
}

impl Render for TabNav<'_> {
    fn render(&self) -> Markup {
        let params = self.params;
        let tabs = [
            (ProfileTab::Posts, format!("Posts ({})", params.post_count)),
            (
                ProfileTab::Comments,
                format!("Comments ({})", params.comment_count),
            ),
        ];

        html! {
            nav class="tab-nav" {
                @for (tab, label) in tabs {
                    @if tab == params.tab {
                        strong { (label) }
                        " "
                    } @else {
                        a href=(format!(
                            "/user/{}?tab={}&sort={}",
                            encode(params.username),
                            tab.as_str(),
                            params.sort.as_str()
                        )) {
                            (label)
                        }
                        " "
                    }
                }
            }
        }
    }
}

/// One of the user's comments, linking into its thread.
#[derive(Debug)]
struct ProfileCommentCard<'a> {
    comment: &'a Comment,
}

impl Render for ProfileCommentCard<'_> {
    fn render(&self) -> Markup {
        let comment = self.comment;
        let post_id = ids::clean(&comment.submission_id);

        html! {
            div class="comment" {
                p class="comment-meta" {
                    i {
                        "Score: " (comment.score)
                        " | Posted on: " (format_timestamp(comment.created_utc))
                        " in r/" (comment.subreddit)
                    }
                }
                p class="comment-body" { (body_markup(&comment.body, &[])) }
                a href=(format!(
                    "/post/{}?comment_id={}",
                    encode(post_id),
                    encode(&comment.id)
                )) {
                    "View Full Post and Comments"
                }
            }
            hr;
        }
    }
}

/// Render the user search page.
#[must_use]
pub fn render_user_search_page(query: &str, users: &[String]) -> Markup {
    let content = html! {
        h1 { "Find a User" }

        form class="search-form" method="get" action="/user" {
            input
                type="search"
                name="q"
                value=(query)
                placeholder="Enter a username"
                aria-label="Username";
            button type="submit" { "Search" }
        }

        @if !query.is_empty() {
            @if users.is_empty() {
                (EmptyState::new("No matching users."))
            } @else {
                ul class="user-list" {
                    @for user in users {
                        li {
                            a href=(format!("/user/{}", encode(user))) { "u/" (user) }
                        }
                    }
                }
            }
        }
    };

    BaseLayout::new("Users").render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(id: &str) -> Submission {
        Submission {
            id: id.to_string(),
            title: "User's post".to_string(),
            selftext: String::new(),
            author: "someone".to_string(),
            subreddit: "archived".to_string(),
            created_utc: 1_500_000_000,
            score: 3,
            num_comments: 0,
        }
    }

    fn sample_comment(id: &str) -> Comment {
        Comment {
            id: id.to_string(),
            submission_id: "t3_parent".to_string(),
            parent_id: "t3_parent".to_string(),
            author: "someone".to_string(),
            body: "their comment".to_string(),
            subreddit: "archived".to_string(),
            created_utc: 1_500_000_100,
            score: 1,
        }
    }

    #[test]
    fn test_profile_posts_tab() {
        let posts = vec![sample_post("a")];
        let params = ProfilePageParams {
            username: "someone",
            tab: ProfileTab::Posts,
            sort: PostSortBy::Newest,
            page: 0,
            total_pages: 1,
            post_count: 1,
            comment_count: 2,
            posts: &posts,
            comments: &[],
        };
        let html = render_profile_page(&params).into_string();

        assert!(html.contains("u/someone"));
        assert!(html.contains("post"));
        assert!(html.contains("/post/a"));
        assert!(html.contains("Posts (1)"));
        assert!(html.contains("Comments (2)"));
        assert!(html.contains("tab=comments"));
    }

    #[test]
    fn test_profile_comments_tab_links_to_thread() {
        let comments = vec![sample_comment("c9")];
        let params = ProfilePageParams {
            username: "someone",
            tab: ProfileTab::Comments,
            sort: PostSortBy::Newest,
            page: 0,
            total_pages: 1,
            post_count: 0,
            comment_count: 1,
            posts: &[],
            comments: &comments,
        };
        let html = render_profile_page(&params).into_string();

        assert!(html.contains("their comment"));
        assert!(html.contains("/post/parent?comment_id=c9"));
    }

    #[test]
    fn test_profile_unknown_user() {
        let params = ProfilePageParams {
            username: "ghost",
            tab: ProfileTab::Posts,
            sort: PostSortBy::Newest,
            page: 0,
            total_pages: 0,
            post_count: 0,
            comment_count: 0,
            posts: &[],
            comments: &[],
        };
        let html = render_profile_page(&params).into_string();

        assert!(html.contains("No posts or comments found"));
        assert!(!html.contains("tab-nav"));
    }

    #[test]
    fn test_user_search_page() {
        let users = vec!["alice".to_string(), "alicia".to_string()];
        let html = render_user_search_page("ali", &users).into_string();

        assert!(html.contains(r#"<a href="/user/alice">u/alice</a>"#));
        assert!(html.contains(r#"<a href="/user/alicia">u/alicia</a>"#));
    }

    #[test]
    fn test_user_search_no_matches() {
        let html = render_user_search_page("zzz", &[]).into_string();
        assert!(html.contains("No matching users."));
    }

    #[test]
    fn test_tab_round_trip() {
        assert_eq!(ProfileTab::from_str("comments"), ProfileTab::Comments);
        assert_eq!(ProfileTab::from_str("posts"), ProfileTab::Posts);
        assert_eq!(ProfileTab::from_str("bogus"), ProfileTab::Posts);
    }
}
