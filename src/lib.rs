//! Reddit Archive Browser library.
//!
//! A read-only web UI for browsing an archived Reddit community: paginated
//! post listings, threaded comment views, post/comment search (exact or
//! full-text), and user profiles, served from a SQLite snapshot of the
//! community's submissions and comments.

pub mod comment_tree;
pub mod components;
pub mod config;
pub mod db;
pub mod ids;
pub mod search_api;
pub mod util;
pub mod web;
