use serde::{Deserialize, Serialize};

/// An archived submission (post).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Submission {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub author: String,
    pub subreddit: String,
    pub created_utc: i64,
    pub score: i64,
    pub num_comments: i64,
}

/// An archived comment.
///
/// `submission_id` and `parent_id` are stored in fullname form (`t3_...` /
/// `t1_...`) as the dataset shipped them; `id` is bare. Comparisons go
/// through [`crate::ids`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: String,
    pub submission_id: String,
    pub parent_id: String,
    pub author: String,
    pub body: String,
    pub subreddit: String,
    pub created_utc: i64,
    pub score: i64,
}

/// Data for loading a submission into the archive.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub author: String,
    pub subreddit: String,
    pub created_utc: i64,
    pub score: i64,
    pub num_comments: i64,
}

/// Data for loading a comment into the archive.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub id: String,
    pub submission_id: String,
    pub parent_id: String,
    pub author: String,
    pub body: String,
    pub subreddit: String,
    pub created_utc: i64,
    pub score: i64,
}

/// Sort order for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSortBy {
    /// Highest score first
    #[default]
    MostUpvotes,
    /// Most recent first
    Newest,
    /// Oldest first
    Oldest,
    /// Most comments first
    MostComments,
}

impl PostSortBy {
    /// Create from a URL parameter value.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s {
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            "most_comments" => Self::MostComments,
            _ => Self::MostUpvotes,
        }
    }

    /// The URL parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MostUpvotes => "most_upvotes",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::MostComments => "most_comments",
        }
    }

    /// The display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MostUpvotes => "Most Upvotes",
            Self::Newest => "Newest",
            Self::Oldest => "Oldest",
            Self::MostComments => "Most Comments",
        }
    }

    /// The ORDER BY clause for this sort. Constant strings only; never
    /// interpolate user input here.
    #[must_use]
    pub const fn sql_order(&self) -> &'static str {
        match self {
            Self::MostUpvotes => "score DESC",
            Self::Newest => "created_utc DESC",
            Self::Oldest => "created_utc ASC",
            Self::MostComments => "num_comments DESC",
        }
    }
}

/// Sort order for a post's comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSortBy {
    #[default]
    MostUpvotes,
    Newest,
    Oldest,
}

impl CommentSortBy {
    /// Create from a URL parameter value.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s {
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            _ => Self::MostUpvotes,
        }
    }

    /// The URL parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MostUpvotes => "most_upvotes",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }

    /// The display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MostUpvotes => "Most Upvotes",
            Self::Newest => "Newest",
            Self::Oldest => "Oldest",
        }
    }

    /// The ORDER BY clause for this sort.
    #[must_use]
    pub const fn sql_order(&self) -> &'static str {
        match self {
            Self::MostUpvotes => "score DESC",
            Self::Newest => "created_utc DESC",
            Self::Oldest => "created_utc ASC",
        }
    }
}

/// Where a search query looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    PostTitle,
    PostBody,
    Comments,
    #[default]
    Everything,
}

impl SearchScope {
    /// Create from a URL parameter value.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s {
            "post_title" => Self::PostTitle,
            "post_body" => Self::PostBody,
            "comments" => Self::Comments,
            _ => Self::Everything,
        }
    }

    /// The URL parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PostTitle => "post_title",
            Self::PostBody => "post_body",
            Self::Comments => "comments",
            Self::Everything => "everything",
        }
    }

    /// The display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PostTitle => "Post Titles",
            Self::PostBody => "Post Body Text",
            Self::Comments => "Comments Only",
            Self::Everything => "Everything",
        }
    }

    /// Whether this scope includes submissions.
    #[must_use]
    pub const fn includes_posts(&self) -> bool {
        matches!(self, Self::PostTitle | Self::PostBody | Self::Everything)
    }

    /// Whether this scope includes comments.
    #[must_use]
    pub const fn includes_comments(&self) -> bool {
        matches!(self, Self::Comments | Self::Everything)
    }
}

/// Inclusive `created_utc` bounds for search filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub after: Option<i64>,
    pub before: Option<i64>,
}

impl DateRange {
    /// Concrete bind values; unbounded sides bind the full integer range so
    /// the SQL can use a fixed pair of comparisons.
    #[must_use]
    pub fn bounds(&self) -> (i64, i64) {
        (self.after.unwrap_or(0), self.before.unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_sort_round_trips() {
        for sort in [
            PostSortBy::MostUpvotes,
            PostSortBy::Newest,
            PostSortBy::Oldest,
            PostSortBy::MostComments,
        ] {
            assert_eq!(PostSortBy::from_str(sort.as_str()), sort);
        }
    }

    #[test]
    fn test_unknown_sort_falls_back_to_score() {
        assert_eq!(PostSortBy::from_str("bogus"), PostSortBy::MostUpvotes);
        assert_eq!(CommentSortBy::from_str("bogus"), CommentSortBy::MostUpvotes);
    }

    #[test]
    fn test_scope_membership() {
        assert!(SearchScope::Everything.includes_posts());
        assert!(SearchScope::Everything.includes_comments());
        assert!(SearchScope::PostTitle.includes_posts());
        assert!(!SearchScope::PostTitle.includes_comments());
        assert!(SearchScope::Comments.includes_comments());
        assert!(!SearchScope::Comments.includes_posts());
    }

    #[test]
    fn test_date_range_bounds() {
        let range = DateRange {
            after: Some(100),
            before: None,
        };
        assert_eq!(range.bounds(), (100, i64::MAX));
        assert_eq!(DateRange::default().bounds(), (0, i64::MAX));
    }
}
