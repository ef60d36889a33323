//! Route definitions for the HTTP API.

pub mod bookmarks;
pub mod data;
pub mod health;
pub mod links;
pub mod notifications;
pub mod search;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(data::routes())
        .merge(links::routes())
        .merge(search::routes())
        .merge(notifications::routes())
        .merge(bookmarks::routes())
        .with_state(state)
}
