//! Post detail page: the post body and its threaded comments, with the
//! optional highlighted-chain view for comments reached from search.

use maud::{html, Markup, Render};
use urlencoding::encode;

use crate::comment_tree::{HighlightedChain, ThreadedComment};
use crate::components::{body_markup, BaseLayout, CommentThread};
use crate::db::{CommentSortBy, Submission};
use crate::util::format_timestamp;

/// Sort navigation for a post's comments, preserving the highlight target.
#[derive(Debug, Clone)]
pub struct CommentSortNav<'a> {
    pub post_id: &'a str,
    pub current_sort: CommentSortBy,
    pub comment_id: Option<&'a str>,
}

impl Render for CommentSortNav<'_> {
    fn render(&self) -> Markup {
        let sort_options = [
            CommentSortBy::MostUpvotes,
            CommentSortBy::Newest,
            CommentSortBy::Oldest,
        ];

        html! {
            nav class="sort-nav" {
                span { "Sort comments by: " }
                @for sort in sort_options {
                    @if sort == self.current_sort {
                        strong { (sort.label()) }
                        " "
                    } @else {
                        @let url = match self.comment_id {
                            Some(cid) => format!(
                                "/post/{}?sort={}&comment_id={}",
                                encode(self.post_id),
                                sort.as_str(),
                                encode(cid)
                            ),
                            None => format!(
                                "/post/{}?sort={}",
                                encode(self.post_id),
                                sort.as_str()
                            ),
                        };
                        a href=(url) { (sort.label()) }
                        " "
                    }
                }
            }
        }
    }
}

/// Parameters for the post detail page.
#[derive(Debug, Clone)]
pub struct PostPageParams<'a> {
    pub post: &'a Submission,
    pub tree: &'a [ThreadedComment<'a>],
    /// The focused thread around a highlighted comment, rendered before the
    /// full listing. `None` when no target was given or "bring to top" is
    /// off.
    pub chain: Option<&'a HighlightedChain<'a>>,
    pub sort: CommentSortBy,
    /// Bare or prefixed id of the comment to style as highlighted.
    pub highlight_id: Option<&'a str>,
}

/// Render the post detail page.
#[must_use]
pub fn render_post_page(params: &PostPageParams<'_>) -> Markup {
    let post = params.post;
    let skip = params.chain.map(|c| &c.included);

    let content = html! {
        article class="post-detail" {
            h1 { (post.title) }
            @if !post.selftext.is_empty() {
                div class="post-body" { (body_markup(&post.selftext, &[])) }
            }
            p {
                "Score: " (post.score)
                " | Comments: " (post.num_comments)
                " | Posted on: " (format_timestamp(post.created_utc))
            }
            p {
                "Posted by "
                a href=(format!("/user/{}", encode(&post.author))) { "u/" (post.author) }
                " in r/" (post.subreddit)
            }
        }
        hr;

        (CommentSortNav {
            post_id: &post.id,
            current_sort: params.sort,
            comment_id: params.highlight_id,
        })

        @if let Some(chain) = params.chain {
            section class="highlighted-thread" {
                h3 { "Highlighted Comment Thread:" }
                (CommentThread::new(&chain.chain)
                    .highlighting(params.highlight_id))
            }
        }

        section class="all-comments" {
            h3 { "All Comments:" }
            @if params.tree.is_empty() {
                p { "No comments yet." }
            } @else {
                (CommentThread::new(params.tree)
                    .skipping(skip)
                    .highlighting(params.highlight_id))
            }
        }
    };

    BaseLayout::new(&post.title).render(content)
}
