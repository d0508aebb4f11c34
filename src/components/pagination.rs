//! Pagination component for navigating through multi-page content.
//!
//! This module provides a reusable pagination component that renders
//! navigation controls with first, previous, page numbers, next, and last links.

use maud::{html, Markup, Render};
use urlencoding::encode;

/// Pagination component for navigating through multi-page content.
///
/// Displays: First, Prev, current-2, current-1, current, current+1, current+2, Next, Last
/// Automatically hides if there's only 1 page.
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Current page number (0-indexed internally, displayed as 1-indexed)
    pub current_page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Base URL for page links (query params will be appended)
    pub base_url: String,
    /// Extra query parameters to preserve in every link (sort, query, ...)
    pub params: Vec<(String, String)>,
}

impl Pagination {
    /// Create a new pagination component.
    ///
    /// # Arguments
    /// * `current_page` - Current page number (0-indexed)
    /// * `total_pages` - Total number of pages
    /// * `base_url` - Base URL for page links
    #[must_use]
    pub fn new(current_page: usize, total_pages: usize, base_url: &str) -> Self {
        Self {
            current_page,
            total_pages,
            base_url: base_url.to_string(),
            params: Vec::new(),
        }
    }

    /// Preserve a query parameter in pagination links. `None` values are
    /// skipped so callers can pass optional filters straight through.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.params.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Build URL for a specific page number with all parameters preserved.
    fn build_url(&self, page_num: usize) -> String {
        let mut params = Vec::new();

        if page_num > 0 {
            params.push(format!("page={page_num}"));
        }

        for (key, value) in &self.params {
            params.push(format!("{key}={}", encode(value)));
        }

        if params.is_empty() {
            self.base_url.clone()
        } else {
            let query = params.join("&");
            format!("{}?{}", self.base_url, query)
        }
    }

    /// Check if pagination should be displayed.
    #[must_use]
    pub fn should_display(&self) -> bool {
        self.total_pages > 1
    }
}

impl Render for Pagination {
    fn render(&self) -> Markup {
        // Don't render anything if only one page
        if !self.should_display() {
            return html! {};
        }

        let current = self.current_page;
        let total = self.total_pages;

        // Calculate the range of page numbers to display
        let start = current.saturating_sub(2);
        let end = (current + 3).min(total);

        html! {
            nav class="pagination" {
                // Previous button
                @if current > 0 {
                    a href=(self.build_url(current - 1)) { "\u{00ab} Previous" }
                } @else {
                    span class="disabled" { "\u{00ab} Previous" }
                }

                // First page and ellipsis if needed
                @if start > 0 {
                    a href=(self.build_url(0)) { "1" }
                    @if start > 1 {
                        span { "..." }
                    }
                }

                // Page numbers around current page
                @for page_num in start..end {
                    @if page_num == current {
                        span class="current" { (page_num + 1) }
                    } @else {
                        a href=(self.build_url(page_num)) { (page_num + 1) }
                    }
                }

                // Ellipsis and last page if needed
                @if end < total {
                    @if end < total - 1 {
                        span { "..." }
                    }
                    a href=(self.build_url(total - 1)) { (total) }
                }

                // Next button
                @if current + 1 < total {
                    a href=(self.build_url(current + 1)) { "Next \u{00bb}" }
                } @else {
                    span class="disabled" { "Next \u{00bb}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_new() {
        let pagination = Pagination::new(0, 10, "/");
        assert_eq!(pagination.current_page, 0);
        assert_eq!(pagination.total_pages, 10);
        assert_eq!(pagination.base_url, "/");
        assert!(pagination.params.is_empty());
    }

    #[test]
    fn test_pagination_with_params() {
        let pagination = Pagination::new(0, 10, "/")
            .with_param("sort", Some("newest"))
            .with_param("q", None);

        assert_eq!(
            pagination.params,
            vec![("sort".to_string(), "newest".to_string())]
        );
    }

    #[test]
    fn test_build_url_no_params() {
        let pagination = Pagination::new(0, 10, "/");
        // Page 0 should not have page param
        assert_eq!(pagination.build_url(0), "/");
    }

    #[test]
    fn test_build_url_with_page() {
        let pagination = Pagination::new(0, 10, "/search");
        assert_eq!(pagination.build_url(5), "/search?page=5");
    }

    #[test]
    fn test_build_url_encodes_params() {
        let pagination = Pagination::new(0, 10, "/search").with_param("q", Some("two words"));
        let url = pagination.build_url(2);
        assert!(url.contains("page=2"));
        assert!(url.contains("q=two%20words"));
    }

    #[test]
    fn test_should_display_single_page() {
        let pagination = Pagination::new(0, 1, "/");
        assert!(!pagination.should_display());
    }

    #[test]
    fn test_render_single_page_empty() {
        let pagination = Pagination::new(0, 1, "/");
        let html = pagination.render().into_string();
        assert!(html.is_empty());
    }

    #[test]
    fn test_render_first_page() {
        let pagination = Pagination::new(0, 10, "/");
        let html = pagination.render().into_string();

        // Should have disabled previous
        assert!(html.contains("class=\"disabled\""));
        assert!(html.contains("Previous"));

        // Should have current page marked
        assert!(html.contains("class=\"current\""));
        assert!(html.contains(">1<"));

        // Should have next link
        assert!(html.contains("Next"));
    }

    #[test]
    fn test_render_middle_page() {
        let pagination = Pagination::new(5, 10, "/");
        let html = pagination.render().into_string();

        // First page link plus ellipsis
        assert!(html.contains(">1<"));
        assert!(html.contains("..."));

        // Page numbers around current
        assert!(html.contains(">4<"));
        assert!(html.contains(">6<"));
        assert!(html.contains(">8<"));

        // Last page link
        assert!(html.contains(">10<"));
    }

    #[test]
    fn test_render_last_page() {
        let pagination = Pagination::new(9, 10, "/");
        let html = pagination.render().into_string();

        assert!(html.contains("Previous"));
        assert!(html.contains("page=8"));
        assert!(html.contains("class=\"disabled\""));
    }

    #[test]
    fn test_render_preserves_params() {
        let pagination = Pagination::new(2, 10, "/search")
            .with_param("q", Some("bag"))
            .with_param("sort", Some("oldest"));

        let html = pagination.render().into_string();

        assert!(html.contains("q=bag"));
        assert!(html.contains("sort=oldest"));
    }
}
