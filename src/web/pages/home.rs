//! Home page: the paginated post listing.

use maud::{html, Markup, Render};

use crate::components::{BaseLayout, EmptyState, Pagination, PostList};
use crate::db::{PostSortBy, Submission};

/// Sort navigation for the post listing.
#[derive(Debug, Clone)]
pub struct SortNav {
    pub current_sort: PostSortBy,
}

impl SortNav {
    /// Create a new sort navigation.
    #[must_use]
    pub const fn new(current_sort: PostSortBy) -> Self {
        Self { current_sort }
    }
}

impl Render for SortNav {
    fn render(&self) -> Markup {
        let sort_options = [
            PostSortBy::MostUpvotes,
            PostSortBy::Newest,
            PostSortBy::Oldest,
            PostSortBy::MostComments,
        ];

        html! {
            nav class="sort-nav" {
                span { "Sort by: " }
                @for sort in sort_options {
                    @if sort == self.current_sort {
                        strong { (sort.label()) }
                        " "
                    } @else {
                        a href=(format!("/?sort={}", sort.as_str())) { (sort.label()) }
                        " "
                    }
                }
            }
        }
    }
}

/// Parameters for the home page.
#[derive(Debug, Clone)]
pub struct HomePageParams<'a> {
    pub posts: &'a [Submission],
    pub sort: PostSortBy,
    pub page: usize,
    pub total_pages: usize,
}

/// Render the home page.
#[must_use]
pub fn render_home_page(params: &HomePageParams<'_>) -> Markup {
    let content = html! {
        h1 { "Reddit Archive" }

        (SortNav::new(params.sort))

        @if params.posts.is_empty() {
            (EmptyState::new("No posts found."))
        } @else {
            @if params.total_pages > 0 {
                p class="page-indicator" {
                    "Page " (params.page + 1) " of " (params.total_pages)
                }
            }

            (PostList::new(params.posts))

            (Pagination::new(params.page, params.total_pages, "/")
                .with_param("sort", Some(params.sort.as_str())))
        }
    };

    BaseLayout::new("Home").render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(id: &str, title: &str) -> Submission {
        Submission {
            id: id.to_string(),
            title: title.to_string(),
            selftext: String::new(),
            author: "poster".to_string(),
            subreddit: "archived".to_string(),
            created_utc: 1_500_000_000,
            score: 10,
            num_comments: 3,
        }
    }

    #[test]
    fn test_render_home_with_posts() {
        let posts = vec![sample_post("a", "First post"), sample_post("b", "Second post")];
        let params = HomePageParams {
            posts: &posts,
            sort: PostSortBy::MostUpvotes,
            page: 0,
            total_pages: 5,
        };
        let html = render_home_page(&params).into_string();

        assert!(html.contains("First post"));
        assert!(html.contains("Second post"));
        assert!(html.contains("Page 1 of 5"));
        assert!(html.contains("sort=most_upvotes"));
    }

    #[test]
    fn test_render_home_empty() {
        let params = HomePageParams {
            posts: &[],
            sort: PostSortBy::Newest,
            page: 0,
            total_pages: 0,
        };
        let html = render_home_page(&params).into_string();

        assert!(html.contains("No posts found."));
    }

    #[test]
    fn test_sort_nav_marks_current() {
        let html = SortNav::new(PostSortBy::Oldest).render().into_string();

        assert!(html.contains("<strong>Oldest</strong>"));
        assert!(html.contains(r#"<a href="/?sort=newest">Newest</a>"#));
        assert!(!html.contains(r#"<a href="/?sort=oldest">"#));
    }
}
