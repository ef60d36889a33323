//! Durable notification state and feed regeneration.
//!
//! Called after every successful insert, while the caller still holds
//! the log mutex. Persistence failures are logged and swallowed: the
//! primary write is already committed and the in-memory log stays
//! authoritative for the current process.

use std::fs;
use std::path::Path;

use navstack_core::NotificationLog;

use crate::config::ServerConfig;

/// Writes the bounded notification state (when a state path is
/// configured) and regenerates the RSS feed from the full log.
pub fn persist_notifications(log: &NotificationLog, config: &ServerConfig) {
    if let Some(path) = &config.storage_file_path {
        match log.state_json() {
            Ok(state) => {
                if let Err(err) = write_creating_dirs(path, &state) {
                    tracing::warn!(path = %path.display(), error = %err, "failed to persist notification state");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to serialize notification state"),
        }
    }

    let feed = log.render_feed(&config.feed_channel());
    if let Err(err) = write_creating_dirs(&config.rss_file_path, &feed) {
        tracing::warn!(path = %config.rss_file_path.display(), error = %err, "failed to write feed");
    }
}

fn write_creating_dirs(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use navstack_core::NotificationEvent;

    fn event(title: &str) -> NotificationEvent {
        NotificationEvent {
            title: title.to_string(),
            logo: "logo".to_string(),
            url: "https://e.com".to_string(),
            description: "desc".to_string(),
            date: Utc::now(),
        }
    }

    #[test]
    fn writes_state_and_feed_creating_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            storage_file_path: Some(dir.path().join("state/notifications.json")),
            rss_file_path: dir.path().join("static/rss.xml"),
            ..ServerConfig::default()
        };

        let mut log = NotificationLog::new();
        log.record(event("First"));
        persist_notifications(&log, &config);

        let state = fs::read_to_string(config.storage_file_path.as_ref().unwrap()).unwrap();
        let parsed: Vec<NotificationEvent> = serde_json::from_str(&state).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "First");

        let feed = fs::read_to_string(&config.rss_file_path).unwrap();
        assert!(feed.contains("<title>First</title>"));
    }

    #[test]
    fn feed_is_regenerated_without_a_state_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            storage_file_path: None,
            rss_file_path: dir.path().join("rss.xml"),
            ..ServerConfig::default()
        };

        persist_notifications(&NotificationLog::new(), &config);
        let feed = fs::read_to_string(&config.rss_file_path).unwrap();
        assert!(feed.contains("<rss version=\"2.0\">"));
    }
}
