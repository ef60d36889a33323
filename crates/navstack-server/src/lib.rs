//! navstack-server: HTTP API server for the navigation directory.
//!
//! This crate provides:
//! - REST endpoints for document reads, link insert/update/delete and
//!   search
//! - The bounded recent-updates log with durable state and RSS feed
//! - Bookmark export as a downloadable Netscape bookmark file
//! - Best-effort Telegram and webhook notifications after inserts
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for request
//! tracing and CORS. Every mutating request runs a full
//! fetch → mutate → write → notify cycle against the remote store in
//! `navstack-store`; the document model lives in `navstack-core`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use navstack_server::{config::ServerConfig, routes, state::AppState};
//! use navstack_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::from_env()?)?;
//! let state = AppState::new(store, ServerConfig::from_env());
//! let app = routes::build_router(state);
//! ```

pub mod config;
pub mod error;
pub mod notifier;
pub mod persist;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use notifier::Notifier;
pub use state::AppState;

// Re-export dependent crates
pub use navstack_core;
pub use navstack_store;
