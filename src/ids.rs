//! Reddit identifier ("fullname") helpers.
//!
//! The archived dataset stores references in Reddit's fullname form: a type
//! prefix followed by a base36 id. Comments are `t1_<id>` and submissions
//! are `t3_<id>`, but the id columns themselves are stored bare, so every
//! comparison has to normalize first.

/// Fullname prefix for comments.
pub const COMMENT_PREFIX: &str = "t1_";

/// Fullname prefix for submissions (posts).
pub const POST_PREFIX: &str = "t3_";

/// Strip a `t1_`/`t3_` prefix if present, returning the bare id.
#[must_use]
pub fn clean(id: &str) -> &str {
    id.strip_prefix(COMMENT_PREFIX)
        .or_else(|| id.strip_prefix(POST_PREFIX))
        .unwrap_or(id)
}

/// The comment fullname (`t1_<id>`) for a possibly-bare id.
#[must_use]
pub fn comment_fullname(id: &str) -> String {
    if id.starts_with(COMMENT_PREFIX) || id.starts_with(POST_PREFIX) {
        id.to_string()
    } else {
        format!("{COMMENT_PREFIX}{id}")
    }
}

/// The submission fullname (`t3_<id>`) for a possibly-bare id.
#[must_use]
pub fn post_fullname(id: &str) -> String {
    if id.starts_with(COMMENT_PREFIX) || id.starts_with(POST_PREFIX) {
        id.to_string()
    } else {
        format!("{POST_PREFIX}{id}")
    }
}

/// Whether a comment's `parent_id` refers to the post itself rather than to
/// another comment. Any `t3_` reference counts: a parent pointing at a
/// *different* post cannot be a comment in this set either way.
#[must_use]
pub fn is_post_parent(parent_id: &str, post_id: &str) -> bool {
    parent_id.starts_with(POST_PREFIX) || clean(parent_id) == clean(post_id)
}
