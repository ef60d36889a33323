//! navstack-store: Remote document store adapter.
//!
//! This crate provides:
//! - Raw-content document fetches
//! - Revision-token lookup and revisioned whole-file writes
//! - Directory listings filtered to structured-data extensions
//!
//! The adapter is plain I/O: it never parses or mutates documents. The
//! taxonomy model in `navstack-core` does that, and callers run the
//! fetch → mutate → write cycle themselves.
//!
//! # Usage
//!
//! ```rust,ignore
//! use navstack_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::from_env()?)?;
//! let text = store.fetch_document("nav.yml").await?;
//! store.upload_document("nav.yml", &new_text).await?;
//! ```

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{Revision, Store, StoreConfig, is_document_name};
