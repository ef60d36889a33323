//! Link mutation routes: insert, update, delete.
//!
//! Every mutation is a full read-modify-write cycle against the remote
//! store: fetch the document fresh, mutate it in memory, re-serialize
//! the whole file and write it back. There is no lock and no revision
//! check across requests; concurrent writers race and the later write
//! wins (accepted lost-update hazard).
//!
//! Request field names (`title`, `url`, `logo`, `description`,
//! `taxonomy`, `term`, `filename`) are a stable external vocabulary and
//! must not change.

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, post, put},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use navstack_core::{Document, LinkEntry, LinkPatch, NotificationEvent};
use navstack_store::StoreError;

use crate::error::{ApiError, ApiResult};
use crate::persist::persist_notifications;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of POST /api/yaml.
#[derive(Debug, Deserialize)]
pub struct InsertRequest {
    /// Target document name.
    pub filename: String,
    /// The entry to insert and where to file it.
    #[serde(rename = "newDataEntry")]
    pub new_data_entry: NewDataEntry,
}

/// The insert payload: link fields plus its place in the taxonomy.
#[derive(Debug, Deserialize)]
pub struct NewDataEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub taxonomy: String,
    /// Optional second-level term within the taxonomy.
    pub term: Option<String>,
    /// Optional icon, applied when the insert creates the category.
    pub icon: Option<String>,
}

/// Body of PUT /api/update.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub filename: String,
    /// Title of the link(s) to update; every match is touched.
    pub title: String,
    #[serde(rename = "updatedData")]
    pub updated_data: LinkPatch,
}

/// Body of DELETE /api/delete.
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub filename: String,
    /// Title of the link(s) to remove; every match is removed.
    pub title: String,
}

/// Response for a successful insert.
#[derive(Debug, Serialize)]
pub struct InsertResponse {
    pub message: String,
}

/// Response for a successful update.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: String,
    /// Number of links the patch was applied to.
    pub matched: usize,
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    /// Number of links removed.
    pub deleted: usize,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/yaml - Insert a link into a document.
///
/// Validates the entry before any network call, then runs
/// fetch → insert → write → notify. A document that does not exist yet
/// starts empty and is created by the write.
///
/// # Response
///
/// - 200 OK: `{ "message": ... }`
/// - 400 Bad Request: a required entry field is missing or empty
async fn insert_link(
    State(state): State<AppState>,
    Json(request): Json<InsertRequest>,
) -> ApiResult<Json<InsertResponse>> {
    let InsertRequest {
        filename,
        new_data_entry,
    } = request;

    let entry = LinkEntry {
        title: new_data_entry.title,
        logo: new_data_entry.logo,
        url: new_data_entry.url,
        description: new_data_entry.description,
    };
    // Reject incomplete entries before touching the store.
    entry.validate()?;

    let text = match state.store().fetch_document(&filename).await {
        Ok(text) => text,
        Err(StoreError::NotFound(_)) => String::new(),
        Err(err) => return Err(err.into()),
    };
    let mut document = Document::parse(&text)?;
    document.insert_link(
        &new_data_entry.taxonomy,
        new_data_entry.term.as_deref(),
        new_data_entry.icon.as_deref(),
        entry.clone(),
    )?;

    state
        .store()
        .upload_document(&filename, &document.serialize()?)
        .await?;

    // The write is committed: record, persist, then announce. None of
    // these may fail the request anymore.
    let event = NotificationEvent {
        title: entry.title,
        logo: entry.logo,
        url: entry.url,
        description: entry.description,
        date: Utc::now(),
    };
    {
        let mut log = state.log().lock().await;
        log.record(event.clone());
        persist_notifications(&log, state.config());
    }
    state.notifier().announce(&event).await;

    tracing::info!(%filename, title = %event.title, "link inserted");
    Ok(Json(InsertResponse {
        message: "link added".to_string(),
    }))
}

/// PUT /api/update - Patch every link with a matching title.
///
/// # Response
///
/// - 200 OK: `{ "message": ..., "matched": n }`
/// - 404 Not Found: document missing, or no link carries the title
async fn update_link(
    State(state): State<AppState>,
    Json(request): Json<UpdateRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let text = state.store().fetch_document(&request.filename).await?;
    let mut document = Document::parse(&text)?;

    let matched = document.update_links(&request.title, &request.updated_data);
    if matched == 0 {
        return Err(ApiError::NotFound(format!(
            "no link titled \"{}\" in {}",
            request.title, request.filename
        )));
    }

    state
        .store()
        .upload_document(&request.filename, &document.serialize()?)
        .await?;

    tracing::info!(filename = %request.filename, title = %request.title, matched, "links updated");
    Ok(Json(UpdateResponse {
        message: "link updated".to_string(),
        matched,
    }))
}

/// DELETE /api/delete - Remove every link with a matching title.
///
/// # Response
///
/// - 200 OK: `{ "message": ..., "deleted": n }`
/// - 404 Not Found: document missing, or no link carries the title
async fn delete_link(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> ApiResult<Json<DeleteResponse>> {
    let text = state.store().fetch_document(&request.filename).await?;
    let mut document = Document::parse(&text)?;

    let deleted = document.delete_links(&request.title);
    if deleted == 0 {
        return Err(ApiError::NotFound(format!(
            "no link titled \"{}\" in {}",
            request.title, request.filename
        )));
    }

    state
        .store()
        .upload_document(&request.filename, &document.serialize()?)
        .await?;

    tracing::info!(filename = %request.filename, title = %request.title, deleted, "links deleted");
    Ok(Json(DeleteResponse {
        message: "link deleted".to_string(),
        deleted,
    }))
}

/// Build link mutation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/yaml", post(insert_link))
        .route("/api/update", put(update_link))
        .route("/api/delete", delete(delete_link))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_request_uses_the_external_vocabulary() {
        let request: InsertRequest = serde_json::from_str(
            r#"{
                "filename": "nav.yml",
                "newDataEntry": {
                    "title": "Example",
                    "url": "https://e.com",
                    "logo": "https://e.com/l.png",
                    "description": "demo",
                    "taxonomy": "Tools",
                    "term": "CLI"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(request.filename, "nav.yml");
        assert_eq!(request.new_data_entry.taxonomy, "Tools");
        assert_eq!(request.new_data_entry.term.as_deref(), Some("CLI"));
    }

    #[test]
    fn insert_carries_the_icon_onto_a_new_category() {
        let request: InsertRequest = serde_json::from_str(
            r#"{
                "filename": "nav.yml",
                "newDataEntry": {
                    "title": "Example",
                    "url": "https://e.com",
                    "logo": "https://e.com/l.png",
                    "description": "demo",
                    "taxonomy": "Tools",
                    "icon": "fa-wrench"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(request.new_data_entry.icon.as_deref(), Some("fa-wrench"));

        let mut document = Document::default();
        let entry = LinkEntry {
            title: request.new_data_entry.title.clone(),
            logo: request.new_data_entry.logo.clone(),
            url: request.new_data_entry.url.clone(),
            description: request.new_data_entry.description.clone(),
        };
        document
            .insert_link(
                &request.new_data_entry.taxonomy,
                request.new_data_entry.term.as_deref(),
                request.new_data_entry.icon.as_deref(),
                entry,
            )
            .unwrap();
        assert_eq!(document.categories[0].icon.as_deref(), Some("fa-wrench"));
    }

    #[test]
    fn insert_request_tolerates_missing_entry_fields() {
        // Presence is checked by LinkEntry::validate, not by serde, so a
        // missing field deserializes to empty and gets a proper 400.
        let request: InsertRequest = serde_json::from_str(
            r#"{"filename": "nav.yml", "newDataEntry": {"title": "x", "taxonomy": "T"}}"#,
        )
        .unwrap();
        assert!(request.new_data_entry.url.is_empty());

        let entry = LinkEntry {
            title: request.new_data_entry.title,
            logo: request.new_data_entry.logo,
            url: request.new_data_entry.url,
            description: request.new_data_entry.description,
        };
        assert!(entry.validate().is_err());
    }

    #[test]
    fn update_request_reads_updated_data_as_a_patch() {
        let request: UpdateRequest = serde_json::from_str(
            r#"{
                "filename": "nav.yml",
                "title": "Example",
                "updatedData": {"url": "https://new.example"}
            }"#,
        )
        .unwrap();
        assert_eq!(request.updated_data.url.as_deref(), Some("https://new.example"));
        assert!(request.updated_data.title.is_none());
    }
}
