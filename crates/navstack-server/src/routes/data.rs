//! Document listing and raw document reads.
//!
//! - GET /data - List document names in the store directory
//! - GET /data/{filename} - Raw text of one document

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /data - List the `.yaml`/`.yml` document names in the store.
async fn list_documents(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let names = state.store().list_documents().await?;
    Ok(Json(names))
}

/// GET /data/{filename} - Raw document text.
///
/// # Response
///
/// - 200 OK: the document body as stored
/// - 404 Not Found: no such document
async fn get_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<String> {
    let text = state.store().fetch_document(&filename).await?;
    Ok(text)
}

/// Build document read routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/data", get(list_documents))
        .route("/data/{filename}", get(get_document))
}
