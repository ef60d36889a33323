//! Bookmark export endpoint.
//!
//! GET /api/export-bookmarks
//!
//! Flattens every local document into one Netscape bookmark file,
//! writes it under the configured output directory and returns it as a
//! download. The export reads the local document directory (a checkout
//! of the store), visiting documents in name order. Rendering happens
//! fully in memory: on any read or parse failure the export aborts and
//! nothing partial is persisted.

use axum::{
    Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};
use tokio::fs;

use navstack_core::{Document, bookmarks};
use navstack_store::is_document_name;

use crate::config::BOOKMARKS_FILE_NAME;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/export-bookmarks - Generate and download the bookmark file.
///
/// # Response
///
/// - 200 OK: the bookmark file as a `text/html` attachment
/// - 500 Internal Error: source directory missing or a document
///   unreadable; no file is written
async fn export_bookmarks(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let config = state.config();

    let documents = load_documents(&state).await?;
    let items = bookmarks::flatten(&documents);
    let html = bookmarks::render(&items, &config.bookmarks_title, &config.bookmarks_h1);

    fs::create_dir_all(&config.bookmarks_output_dir)
        .await
        .map_err(|err| ApiError::Internal(format!("bookmark export failed: {err}")))?;
    let output_path = config.bookmarks_output_dir.join(BOOKMARKS_FILE_NAME);
    fs::write(&output_path, &html)
        .await
        .map_err(|err| ApiError::Internal(format!("bookmark export failed: {err}")))?;

    tracing::info!(path = %output_path.display(), items = items.len(), "bookmark file exported");
    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{BOOKMARKS_FILE_NAME}\""),
            ),
        ],
        html,
    ))
}

/// Reads and parses every document in the local data directory, in
/// name order.
async fn load_documents(state: &AppState) -> ApiResult<Vec<Document>> {
    let data_dir = &state.config().data_dir;
    let mut entries = fs::read_dir(data_dir)
        .await
        .map_err(|err| ApiError::Internal(format!("cannot read {}: {err}", data_dir.display())))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|err| ApiError::Internal(format!("cannot read {}: {err}", data_dir.display())))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_document_name(&name) {
            names.push(name);
        }
    }
    names.sort();

    let mut documents = Vec::with_capacity(names.len());
    for name in names {
        let path = data_dir.join(&name);
        let text = fs::read_to_string(&path)
            .await
            .map_err(|err| ApiError::Internal(format!("cannot read {}: {err}", path.display())))?;
        documents.push(Document::parse(&text)?);
    }
    Ok(documents)
}

/// Build bookmark export routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/export-bookmarks", get(export_bookmarks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use navstack_store::{Store, StoreConfig};

    fn state_with(config: ServerConfig) -> AppState {
        let store = Store::new(StoreConfig {
            token: "t".to_string(),
            repo: "o/r".to_string(),
            branch: "main".to_string(),
            data_dir: "data/".to_string(),
        })
        .unwrap();
        AppState::new(store, config)
    }

    #[tokio::test]
    async fn export_writes_file_with_document_category_term_order() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir(&data_dir).unwrap();
        std::fs::write(
            data_dir.join("1-a.yaml"),
            "- taxonomy: A\n  links:\n    - {title: L1, logo: x, url: u1, description: d}\n",
        )
        .unwrap();
        std::fs::write(
            data_dir.join("2-b.yml"),
            "- taxonomy: B\n  list:\n    - term: T1\n      links:\n        - {title: L2, logo: x, url: u2, description: d}\n",
        )
        .unwrap();
        std::fs::write(data_dir.join("ignored.txt"), "not a document").unwrap();

        let output_dir = dir.path().join("out");
        let config = ServerConfig {
            data_dir: data_dir.clone(),
            bookmarks_output_dir: output_dir.clone(),
            ..ServerConfig::default()
        };

        let state = state_with(config);
        export_bookmarks(State(state)).await.unwrap();

        let html = std::fs::read_to_string(output_dir.join(BOOKMARKS_FILE_NAME)).unwrap();
        assert!(html.starts_with("<!DOCTYPE NETSCAPE-Bookmark-file-1>"));
        assert!(!html.contains("ignored"));
        let positions: Vec<_> = [">A</H3>", ">L1</A>", ">B</H3>", ">T1</H3>", ">L2</A>"]
            .iter()
            .map(|needle| html.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn export_aborts_when_source_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("out");
        let config = ServerConfig {
            data_dir: dir.path().join("no-such-dir"),
            bookmarks_output_dir: output_dir.clone(),
            ..ServerConfig::default()
        };

        let state = state_with(config);
        let err = export_bookmarks(State(state)).await.err().unwrap();
        assert!(matches!(err, ApiError::Internal(_)));
        // Nothing partial persisted.
        assert!(!output_dir.exists());
    }
}
