//! Bounded notification log and RSS feed generation.
//!
//! Every successful insert records a [`NotificationEvent`]. The log keeps
//! the 40 most recent events, most-recent-first, and is the single source
//! for both the durable JSON state and the regenerated RSS feed. The log
//! is plain data; callers that share it across threads wrap it in a
//! mutex so record-then-truncate stays atomic per call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Maximum number of events retained in the log and persisted state.
pub const LOG_CAPACITY: usize = 40;

/// A logged record of one successful link insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub title: String,
    pub logo: String,
    pub url: String,
    pub description: String,
    /// When the insert was committed.
    pub date: DateTime<Utc>,
}

/// Channel metadata for the generated feed.
#[derive(Debug, Clone)]
pub struct FeedChannel {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Bounded most-recent-first record of successful changes.
#[derive(Debug, Default)]
pub struct NotificationLog {
    events: Vec<NotificationEvent>,
}

impl NotificationLog {
    /// Creates an empty log. Seeded empty at process start; there is no
    /// cross-restart reload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `event` and truncates to [`LOG_CAPACITY`] by dropping
    /// the oldest entries from the tail.
    pub fn record(&mut self, event: NotificationEvent) {
        self.events.insert(0, event);
        self.events.truncate(LOG_CAPACITY);
    }

    /// Current events, most recent first.
    #[must_use]
    pub fn events(&self) -> &[NotificationEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Durable state payload: a pretty JSON array of at most
    /// [`LOG_CAPACITY`] events.
    pub fn state_json(&self) -> CoreResult<String> {
        let bounded: Vec<_> = self.events.iter().take(LOG_CAPACITY).collect();
        Ok(serde_json::to_string_pretty(&bounded)?)
    }

    /// Renders the RSS 2.0 feed over the full log, newest item first.
    #[must_use]
    pub fn render_feed(&self, channel: &FeedChannel) -> String {
        let items: String = self
            .events
            .iter()
            .map(|event| {
                format!(
                    r#"
        <item>
            <title>{title}</title>
            <link>{url}</link>
            <description>{description}</description>
            <guid>{url}</guid>
            <pubDate>{date}</pubDate>
        </item>
    "#,
                    title = escape_xml(&event.title),
                    url = escape_xml(&event.url),
                    description = escape_xml(&event.description),
                    date = event.date.to_rfc2822(),
                )
            })
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">
<channel>
    <title>{title}</title>
    <link>{link}</link>
    <description>{description}</description>
    {items}
</channel>
</rss>"#,
            title = escape_xml(&channel.title),
            link = escape_xml(&channel.link),
            description = escape_xml(&channel.description),
        )
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'` for XML text content. Ampersand
/// first so already-escaped sequences are not double-mangled.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(n: u32) -> NotificationEvent {
        NotificationEvent {
            title: format!("E{n}"),
            logo: format!("https://e.com/{n}.png"),
            url: format!("https://e.com/{n}"),
            description: format!("event {n}"),
            date: Utc::now(),
        }
    }

    #[test]
    fn record_is_most_recent_first() {
        let mut log = NotificationLog::new();
        log.record(event(1));
        log.record(event(2));
        assert_eq!(log.events()[0].title, "E2");
        assert_eq!(log.events()[1].title, "E1");
    }

    #[test]
    fn record_truncates_to_capacity_dropping_oldest() {
        let mut log = NotificationLog::new();
        for n in 1..=41 {
            log.record(event(n));
        }
        assert_eq!(log.len(), 40);
        assert_eq!(log.events()[0].title, "E41");
        assert_eq!(log.events()[39].title, "E2");
        assert!(log.events().iter().all(|e| e.title != "E1"));
    }

    #[test]
    fn state_json_roundtrips_bounded_events() {
        let mut log = NotificationLog::new();
        for n in 1..=45 {
            log.record(event(n));
        }
        let state = log.state_json().unwrap();
        let parsed: Vec<NotificationEvent> = serde_json::from_str(&state).unwrap();
        assert_eq!(parsed.len(), 40);
        assert_eq!(parsed[0].title, "E45");
    }

    #[test]
    fn feed_lists_items_newest_first() {
        let mut log = NotificationLog::new();
        log.record(event(1));
        log.record(event(2));
        let feed = log.render_feed(&FeedChannel {
            title: "Updates".to_string(),
            link: "https://nav.example".to_string(),
            description: "recent additions".to_string(),
        });
        assert!(feed.starts_with("<?xml"));
        let first = feed.find("<title>E2</title>").unwrap();
        let second = feed.find("<title>E1</title>").unwrap();
        assert!(first < second);
        assert!(feed.contains("<guid>https://e.com/2</guid>"));
    }

    #[test]
    fn feed_escapes_markup_in_text_fields() {
        let mut log = NotificationLog::new();
        log.record(NotificationEvent {
            title: "Tom & Jerry <show>".to_string(),
            logo: String::new(),
            url: "https://e.com/?a=1&b=2".to_string(),
            description: "it's \"classic\"".to_string(),
            date: Utc::now(),
        });
        let feed = log.render_feed(&FeedChannel {
            title: "t".to_string(),
            link: "l".to_string(),
            description: "d".to_string(),
        });
        assert!(feed.contains("Tom &amp; Jerry &lt;show&gt;"));
        assert!(feed.contains("https://e.com/?a=1&amp;b=2"));
        assert!(feed.contains("it&#39;s &quot;classic&quot;"));
        assert!(!feed.contains("<show>"));
    }

    #[test]
    fn escape_xml_covers_all_five() {
        assert_eq!(escape_xml(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#39;");
    }
}
