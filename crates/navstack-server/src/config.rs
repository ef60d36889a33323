//! Server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use navstack_core::FeedChannel;

/// Fixed name of the generated bookmark file.
pub const BOOKMARKS_FILE_NAME: &str = "bookmarks.html";

/// Server configuration.
///
/// Everything is optional with a default; the only required environment
/// variables belong to the store (`GITHUB_TOKEN`, `GITHUB_REPO`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Local directory holding document copies for bookmark export.
    pub data_dir: PathBuf,
    /// Public URL of the navigation site, referenced in notifications.
    pub navigation_url: Option<String>,
    /// Telegram bot token for chat notifications.
    pub telegram_bot_token: Option<String>,
    /// Telegram chat to notify.
    pub telegram_chat_id: Option<String>,
    /// Generic webhook receiving insert notifications.
    pub webhook_url: Option<String>,
    /// Durable notification state file; persistence is skipped when unset.
    pub storage_file_path: Option<PathBuf>,
    /// Generated RSS feed location.
    pub rss_file_path: PathBuf,
    /// RSS channel title.
    pub rss_title: String,
    /// RSS channel link.
    pub rss_link: String,
    /// RSS channel description.
    pub rss_description: String,
    /// Directory receiving the generated bookmark file.
    pub bookmarks_output_dir: PathBuf,
    /// TITLE of the bookmark file.
    pub bookmarks_title: String,
    /// H1 heading of the bookmark file.
    pub bookmarks_h1: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8980,
            log_level: "info".to_string(),
            cors_allowed_origins: "*".to_string(),
            data_dir: PathBuf::from("data/"),
            navigation_url: None,
            telegram_bot_token: None,
            telegram_chat_id: None,
            webhook_url: None,
            storage_file_path: None,
            rss_file_path: PathBuf::from("themes/WebStack-Hugo/static/rss.xml"),
            rss_title: "Navigation directory updates".to_string(),
            rss_link: "http://localhost:8980".to_string(),
            rss_description: "Latest additions to the navigation directory".to_string(),
            bookmarks_output_dir: PathBuf::from("themes/WebStack-Hugo/static/bookmarks/"),
            bookmarks_title: "Navstack Bookmarks".to_string(),
            bookmarks_h1: "Navstack Bookmarks".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// the defaults above for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or(defaults.cors_allowed_origins),
            data_dir: env::var("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            navigation_url: env::var("NAVIGATION_URL").ok(),
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").ok(),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").ok(),
            webhook_url: env::var("WEBHOOK_URL").ok(),
            storage_file_path: env::var("STORAGE_FILE_PATH").ok().map(PathBuf::from),
            rss_file_path: env::var("RSS_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.rss_file_path),
            rss_title: env::var("RSS_TITLE").unwrap_or(defaults.rss_title),
            rss_link: env::var("RSS_LINK").unwrap_or(defaults.rss_link),
            rss_description: env::var("RSS_DESCRIPTION").unwrap_or(defaults.rss_description),
            bookmarks_output_dir: env::var("BOOKMARKS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.bookmarks_output_dir),
            bookmarks_title: env::var("BOOKMARKS_TITLE").unwrap_or(defaults.bookmarks_title),
            bookmarks_h1: env::var("BOOKMARKS_H1").unwrap_or(defaults.bookmarks_h1),
        }
    }

    /// Channel metadata for the generated RSS feed.
    pub fn feed_channel(&self) -> FeedChannel {
        FeedChannel {
            title: self.rss_title.clone(),
            link: self.rss_link.clone(),
            description: self.rss_description.clone(),
        }
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8980);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allowed_origins, "*");
        assert!(config.storage_file_path.is_none());
        assert!(config.rss_file_path.ends_with("rss.xml"));
    }

    #[test]
    fn feed_channel_mirrors_rss_settings() {
        let config = ServerConfig {
            rss_title: "t".to_string(),
            rss_link: "l".to_string(),
            rss_description: "d".to_string(),
            ..ServerConfig::default()
        };
        let channel = config.feed_channel();
        assert_eq!(channel.title, "t");
        assert_eq!(channel.link, "l");
        assert_eq!(channel.description, "d");
    }
}
