//! Substring search over one document's links.
//!
//! GET /api/search?keyword=...&filePath=...

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use navstack_core::{Document, LinkEntry};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for GET /api/search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Literal, case-sensitive substring to match against link titles
    /// and descriptions.
    pub keyword: Option<String>,
    /// Document to search.
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
}

/// GET /api/search - Scan one document for matching links.
///
/// # Response
///
/// - 200 OK: JSON array of matching links in traversal order
/// - 400 Bad Request: keyword or filePath missing
async fn search_links(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<LinkEntry>>> {
    let keyword = params
        .keyword
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest("keyword is required".to_string()))?;
    let file_path = params
        .file_path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("filePath is required".to_string()))?;

    let text = state.store().fetch_document(&file_path).await?;
    let document = Document::parse(&text)?;
    Ok(Json(document.find_links(&keyword)))
}

/// Build search routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search_links))
}
