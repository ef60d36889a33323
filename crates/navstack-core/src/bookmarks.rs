//! Bookmark export: flattens taxonomy documents into a Netscape
//! bookmark file.
//!
//! Order is strict and never sorted: documents in the order given, then
//! per category its own links, then each term with its links.

use chrono::Utc;

use crate::notify::escape_xml;
use crate::taxonomy::Document;

/// One line of the exported bookmark list: a directory header or a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkItem {
    /// Category or term header.
    Header { title: String },
    /// Navigable bookmark.
    Link { title: String, url: String },
}

/// Flattens documents into the ordered bookmark item list.
///
/// Headers are emitted only for non-empty `taxonomy`/`term` names, so
/// malformed nodes without a name contribute their links under the
/// previous header.
#[must_use]
pub fn flatten(documents: &[Document]) -> Vec<BookmarkItem> {
    let mut items = Vec::new();
    for document in documents {
        for category in &document.categories {
            if !category.taxonomy.is_empty() {
                items.push(BookmarkItem::Header {
                    title: category.taxonomy.clone(),
                });
            }
            for link in &category.links {
                items.push(BookmarkItem::Link {
                    title: link.title.clone(),
                    url: link.url.clone(),
                });
            }
            for node in &category.list {
                if !node.term.is_empty() {
                    items.push(BookmarkItem::Header {
                        title: node.term.clone(),
                    });
                }
                for link in &node.links {
                    items.push(BookmarkItem::Link {
                        title: link.title.clone(),
                        url: link.url.clone(),
                    });
                }
            }
        }
    }
    items
}

/// Renders the standard Netscape bookmark file, fully in memory.
///
/// Callers write the result to disk only after rendering succeeds, so a
/// partial file is never persisted.
#[must_use]
pub fn render(items: &[BookmarkItem], title: &str, heading: &str) -> String {
    let add_date = Utc::now().timestamp_millis();

    let mut html = String::from("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n");
    html.push_str("<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n");
    html.push_str(&format!("<TITLE>{}</TITLE>\n", escape_xml(title)));
    html.push_str(&format!("<H1>{}</H1>\n", escape_xml(heading)));
    html.push_str("<DL><p>\n");

    for item in items {
        match item {
            BookmarkItem::Header { title } => {
                html.push_str(&format!(
                    "    <DT><H3 ADD_DATE=\"{add_date}\">{}</H3>\n",
                    escape_xml(title)
                ));
            }
            BookmarkItem::Link { title, url } => {
                html.push_str(&format!(
                    "    <DT><A HREF=\"{}\">{}</A>\n",
                    escape_xml(url),
                    escape_xml(title)
                ));
            }
        }
    }

    html.push_str("</DL><p>");
    html
}
