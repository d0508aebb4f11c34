//! Post cards and empty states for listing pages.

use maud::{html, Markup, Render};
use urlencoding::encode;

use crate::db::Submission;
use crate::util::format_timestamp;

/// A card component for a submission in a listing.
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    pub post: &'a Submission,
    /// Pre-escaped markup to use for the title/body instead of the plain
    /// fields (search pages pass term-highlighted versions).
    pub title_markup: Option<Markup>,
    pub body_markup: Option<Markup>,
}

impl<'a> PostCard<'a> {
    /// Create a new post card.
    #[must_use]
    pub fn new(post: &'a Submission) -> Self {
        Self {
            post,
            title_markup: None,
            body_markup: None,
        }
    }

    /// Replace the title with pre-rendered markup.
    #[must_use]
    pub fn with_title_markup(mut self, markup: Markup) -> Self {
        self.title_markup = Some(markup);
        self
    }

    /// Replace the selftext with pre-rendered markup.
    #[must_use]
    pub fn with_body_markup(mut self, markup: Markup) -> Self {
        self.body_markup = Some(markup);
        self
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;

        html! {
            article class="post-card" {
                header {
                    h3 {
                        a href=(format!("/post/{}", encode(&post.id))) {
                            @match &self.title_markup {
                                Some(markup) => { (markup) }
                                None => { (post.title) }
                            }
                        }
                    }
                }
                @if !post.selftext.is_empty() {
                    div class="post-body" {
                        @match &self.body_markup {
                            Some(markup) => { p { (markup) } }
                            None => { p { (post.selftext) } }
                        }
                    }
                }
                footer {
                    p {
                        "Score: " (post.score)
                        " | Comments: " (post.num_comments)
                    }
                    p {
                        "Posted by "
                        a href=(format!("/user/{}", encode(&post.author))) {
                            "u/" (post.author)
                        }
                        " on " (format_timestamp(post.created_utc))
                        " in r/" (post.subreddit)
                    }
                }
            }
        }
    }
}

/// A vertical list of post cards.
#[derive(Debug, Clone)]
pub struct PostList<'a> {
    pub posts: &'a [Submission],
}

impl<'a> PostList<'a> {
    /// Create a new post list.
    #[must_use]
    pub const fn new(posts: &'a [Submission]) -> Self {
        Self { posts }
    }
}

impl Render for PostList<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="post-list" {
                @for post in self.posts {
                    (PostCard::new(post))
                }
            }
        }
    }
}

/// Placeholder shown when a listing has nothing to display.
#[derive(Debug, Clone)]
pub struct EmptyState<'a> {
    pub message: &'a str,
}

impl<'a> EmptyState<'a> {
    /// Create an empty state with a message.
    #[must_use]
    pub const fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// The standard "no search results" empty state.
    #[must_use]
    pub const fn no_results() -> Self {
        Self::new("No results found")
    }
}

impl Render for EmptyState<'_> {
    fn render(&self) -> Markup {
        html! {
            p class="empty-state" { (self.message) }
        }
    }
}
