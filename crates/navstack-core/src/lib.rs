//! navstack-core: Document model for the navigation directory.
//!
//! This crate provides:
//! - The taxonomy document model (category → optional term → links) with
//!   insert/update/delete/search over the nested tree
//! - A capacity-bounded notification log with RSS feed generation
//! - A bookmark exporter that flattens documents into a Netscape
//!   bookmark file
//!
//! Everything here is pure data and logic; fetching documents from the
//! remote store and serving HTTP live in `navstack-store` and
//! `navstack-server`.

pub mod bookmarks;
pub mod error;
pub mod notify;
pub mod taxonomy;

// Re-exports for convenience
pub use bookmarks::BookmarkItem;
pub use error::{CoreError, CoreResult};
pub use notify::{FeedChannel, NotificationEvent, NotificationLog};
pub use taxonomy::{CategoryNode, Document, LinkEntry, LinkPatch, TermNode};
