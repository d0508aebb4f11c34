//! Maud HTML template components for the web UI.
//!
//! Components are organized into submodules by functionality:
//!
//! - `layout`: Base page layout and navigation
//! - `card`: Post cards and empty states
//! - `comment`: Indented comment blocks and thread listings
//! - `pagination`: Page navigation controls

pub mod card;
pub mod comment;
pub mod layout;
pub mod pagination;

pub use card::{EmptyState, PostCard, PostList};
pub use comment::{body_markup, CommentBlock, CommentThread};
pub use layout::BaseLayout;
pub use pagination::Pagination;

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
