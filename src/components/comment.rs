//! Indented comment blocks and thread listings.
//!
//! Rendering rules carried over from the original archive UI: each nesting
//! level indents by a fixed step, capped so pathological threads stay on
//! screen; bodies are escaped with newlines kept as line breaks; the
//! searched-for comment gets a distinct highlight style.

use std::collections::HashSet;

use maud::{html, Markup, PreEscaped, Render};
use urlencoding::encode;

use crate::comment_tree::ThreadedComment;
use crate::ids;
use crate::util::{format_timestamp, highlight_terms};

/// Pixels of indentation per nesting level.
pub const INDENT_STEP_PX: usize = 20;

/// Maximum indentation regardless of depth.
pub const MAX_INDENT_PX: usize = 200;

/// Escape a comment body for HTML, apply optional search-term highlighting,
/// and keep newlines as `<br>`.
#[must_use]
pub fn body_markup(body: &str, terms: &[String]) -> Markup {
    PreEscaped(highlight_terms(body, terms).replace('\n', "<br>"))
}

/// A single rendered comment.
#[derive(Debug, Clone)]
pub struct CommentBlock<'a> {
    pub entry: ThreadedComment<'a>,
    pub highlighted: bool,
    pub terms: &'a [String],
}

impl<'a> CommentBlock<'a> {
    /// Create a comment block for a threaded entry.
    #[must_use]
    pub fn new(entry: ThreadedComment<'a>) -> Self {
        Self {
            entry,
            highlighted: false,
            terms: &[],
        }
    }

    /// Mark this comment as the highlighted search target.
    #[must_use]
    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Highlight occurrences of the given search terms in the body.
    #[must_use]
    pub fn with_terms(mut self, terms: &'a [String]) -> Self {
        self.terms = terms;
        self
    }
}

impl Render for CommentBlock<'_> {
    fn render(&self) -> Markup {
        let comment = self.entry.comment;
        let indent = (self.entry.depth * INDENT_STEP_PX).min(MAX_INDENT_PX);
        let class = if self.highlighted {
            "comment comment-highlighted"
        } else {
            "comment"
        };

        html! {
            div class=(class) style=(format!("margin-left: {indent}px;")) {
                p class="comment-meta" {
                    strong {
                        "Level " (self.entry.depth) " - "
                        a href=(format!("/user/{}", encode(&comment.author))) {
                            "u/" (comment.author)
                        }
                    }
                    " - "
                    i {
                        "Score: " (comment.score)
                        " | Posted on: " (format_timestamp(comment.created_utc))
                    }
                }
                p class="comment-body" {
                    (body_markup(&comment.body, self.terms))
                }
            }
        }
    }
}

/// A flat listing of threaded comments.
#[derive(Debug, Clone)]
pub struct CommentThread<'a> {
    pub entries: &'a [ThreadedComment<'a>],
    /// Bare ids to skip (already shown in the highlighted chain).
    pub skip: Option<&'a HashSet<String>>,
    /// Bare id of the comment to style as highlighted.
    pub highlight_id: Option<&'a str>,
    pub terms: &'a [String],
}

impl<'a> CommentThread<'a> {
    /// Create a thread listing over the given entries.
    #[must_use]
    pub fn new(entries: &'a [ThreadedComment<'a>]) -> Self {
        Self {
            entries,
            skip: None,
            highlight_id: None,
            terms: &[],
        }
    }

    /// Skip entries whose id is in the given set.
    #[must_use]
    pub fn skipping(mut self, skip: Option<&'a HashSet<String>>) -> Self {
        self.skip = skip;
        self
    }

    /// Style the comment with this (possibly prefixed) id as highlighted.
    #[must_use]
    pub fn highlighting(mut self, highlight_id: Option<&'a str>) -> Self {
        self.highlight_id = highlight_id;
        self
    }

    /// Highlight occurrences of the given search terms in bodies.
    #[must_use]
    pub fn with_terms(mut self, terms: &'a [String]) -> Self {
        self.terms = terms;
        self
    }
}

impl Render for CommentThread<'_> {
    fn render(&self) -> Markup {
        let highlight = self.highlight_id.map(ids::clean);

        html! {
            @for entry in self.entries {
                @let id = ids::clean(&entry.comment.id);
                @if self.skip.is_none_or(|s| !s.contains(id)) {
                    (CommentBlock::new(*entry)
                        .highlighted(highlight == Some(id))
                        .with_terms(self.terms))
                    hr;
                }
            }
        }
    }
}
