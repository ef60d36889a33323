//! Taxonomy document model for the navigation directory.
//!
//! A document is one YAML file holding an ordered sequence of categories.
//! Each category groups links directly and/or through a second level of
//! terms:
//!
//! ```yaml
//! ---
//! - taxonomy: Tools
//!   icon: fa-wrench
//!   links:
//!     - title: Example
//!       logo: https://e.com/l.png
//!       url: https://e.com
//!       description: demo
//!   list:
//!     - term: CLI
//!       links: [...]
//! ```
//!
//! `title` is the identity key for update and delete. It is not unique:
//! both operations affect every matching entry in the document. Insert
//! lookups use exact equality on `taxonomy` (document-wide) and `term`
//! (within one category); when source data carries duplicate keys, the
//! first node wins for insert, while scans always visit every node.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// ============================================================================
// Node Types
// ============================================================================

/// One navigable bookmark record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Display title; identity key for update/delete.
    pub title: String,
    /// Logo image URL.
    pub logo: String,
    /// Target URL.
    pub url: String,
    /// Short description, searched together with the title.
    pub description: String,
}

impl LinkEntry {
    /// Checks that every field is present and non-empty.
    ///
    /// Called before any mutation so a rejected insert has no side
    /// effects.
    pub fn validate(&self) -> CoreResult<()> {
        if self.title.is_empty() {
            return Err(CoreError::MissingField("title"));
        }
        if self.url.is_empty() {
            return Err(CoreError::MissingField("url"));
        }
        if self.logo.is_empty() {
            return Err(CoreError::MissingField("logo"));
        }
        if self.description.is_empty() {
            return Err(CoreError::MissingField("description"));
        }
        Ok(())
    }
}

/// Merge patch for a link; set fields overwrite, unset fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub logo: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

impl LinkPatch {
    fn apply(&self, link: &mut LinkEntry) {
        if let Some(title) = &self.title {
            link.title = title.clone();
        }
        if let Some(logo) = &self.logo {
            link.logo = logo.clone();
        }
        if let Some(url) = &self.url {
            link.url = url.clone();
        }
        if let Some(description) = &self.description {
            link.description = description.clone();
        }
    }
}

/// Second-level grouping of links, scoped to one parent category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermNode {
    /// Term name; insert lookup key within one category.
    pub term: String,
    /// Links filed under this term.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkEntry>,
}

/// Top-level grouping of links within a document.
///
/// Absent and empty `links`/`list` are treated as the same state and
/// serialize as absent, so round-trips are stable either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Category name; document-wide insert lookup key.
    pub taxonomy: String,
    /// Optional icon identifier carried through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Links attached directly to the category.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkEntry>,
    /// Second-level term groupings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<TermNode>,
}

/// One taxonomy document: the ordered category sequence of a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub categories: Vec<CategoryNode>,
}

// ============================================================================
// Parse / Serialize
// ============================================================================

impl Document {
    /// Parses YAML document text into the category sequence.
    ///
    /// Blank input and an explicit YAML `null` both yield an empty
    /// document.
    pub fn parse(text: &str) -> CoreResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let categories: Option<Vec<CategoryNode>> = serde_yaml::from_str(text)?;
        Ok(Self {
            categories: categories.unwrap_or_default(),
        })
    }

    /// Serializes the document back to YAML with a leading `---` marker.
    pub fn serialize(&self) -> CoreResult<String> {
        let body = serde_yaml::to_string(&self.categories)?;
        Ok(format!("---\n{body}"))
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Inserts a link under `taxonomy`, and under `term` when given.
    ///
    /// The first category with an equal `taxonomy` is extended; if none
    /// exists one is appended, carrying `icon`. An existing category
    /// keeps its icon. With a term, the first matching term node inside
    /// that category is extended or a new one appended. New nodes and
    /// entries are always appended, never sorted.
    ///
    /// Fails with [`CoreError::MissingField`] before touching the tree
    /// when any of the entry's four fields is empty.
    pub fn insert_link(
        &mut self,
        taxonomy: &str,
        term: Option<&str>,
        icon: Option<&str>,
        entry: LinkEntry,
    ) -> CoreResult<()> {
        entry.validate()?;

        let index = match self.categories.iter().position(|c| c.taxonomy == taxonomy) {
            Some(index) => index,
            None => {
                self.categories.push(CategoryNode {
                    taxonomy: taxonomy.to_string(),
                    icon: icon.map(str::to_string),
                    links: Vec::new(),
                    list: Vec::new(),
                });
                self.categories.len() - 1
            }
        };
        let category = &mut self.categories[index];

        match term {
            Some(term) => {
                let index = match category.list.iter().position(|t| t.term == term) {
                    Some(index) => index,
                    None => {
                        category.list.push(TermNode {
                            term: term.to_string(),
                            links: Vec::new(),
                        });
                        category.list.len() - 1
                    }
                };
                category.list[index].links.push(entry);
            }
            None => category.links.push(entry),
        }
        Ok(())
    }

    /// Applies `patch` to every link whose title equals `title`.
    ///
    /// Visits every category and every term, duplicates included.
    /// Returns the number of links touched; 0 means "not found", not an
    /// error.
    pub fn update_links(&mut self, title: &str, patch: &LinkPatch) -> usize {
        let mut matched = 0;
        for category in &mut self.categories {
            for link in &mut category.links {
                if link.title == title {
                    patch.apply(link);
                    matched += 1;
                }
            }
            for node in &mut category.list {
                for link in &mut node.links {
                    if link.title == title {
                        patch.apply(link);
                        matched += 1;
                    }
                }
            }
        }
        matched
    }

    /// Removes every link whose title equals `title`.
    ///
    /// Returns the number of links removed.
    pub fn delete_links(&mut self, title: &str) -> usize {
        let mut deleted = 0;
        for category in &mut self.categories {
            let before = category.links.len();
            category.links.retain(|link| link.title != title);
            deleted += before - category.links.len();

            for node in &mut category.list {
                let before = node.links.len();
                node.links.retain(|link| link.title != title);
                deleted += before - node.links.len();
            }
        }
        deleted
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Returns every link whose title or description contains `keyword`
    /// as a literal case-sensitive substring, in traversal order:
    /// category links first, then each term's links, categories in
    /// document order.
    pub fn find_links(&self, keyword: &str) -> Vec<LinkEntry> {
        let matches = |link: &LinkEntry| {
            link.title.contains(keyword) || link.description.contains(keyword)
        };

        let mut results = Vec::new();
        for category in &self.categories {
            results.extend(category.links.iter().filter(|l| matches(l)).cloned());
            for node in &category.list {
                results.extend(node.links.iter().filter(|l| matches(l)).cloned());
            }
        }
        results
    }
}

// ============================================================================
// Tests
// ============================================================================
