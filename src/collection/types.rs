use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One cataloged document
///
/// Field names on the wire follow the viewer application's JSON schema
/// (camelCase, `sizeMB`), so an existing catalog round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Stable identifier, a deterministic function of `url` only
    pub id: String,

    /// Unique key within a collection
    pub url: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Category IDs; insertion order carries no meaning
    #[serde(default)]
    pub categories: Vec<String>,

    /// Provenance tag: which backend discovered the URL
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(
        rename = "yearPublished",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub year_published: Option<u16>,

    /// Free-text terms, ordered (the whitespace-split source query)
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(rename = "isAvailable", default = "default_true")]
    pub is_available: bool,

    #[serde(rename = "dateAdded")]
    pub date_added: NaiveDate,

    #[serde(rename = "lastChecked")]
    pub last_checked: NaiveDate,

    /// Last observed HTTP status
    #[serde(rename = "lastStatus", default = "default_status")]
    pub last_status: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    #[serde(rename = "sizeMB", default, skip_serializing_if = "Option::is_none")]
    pub size_mb: Option<f64>,
}

fn default_source() -> String {
    "unknown".to_string()
}

fn default_true() -> bool {
    true
}

fn default_status() -> u16 {
    200
}

/// Catalog-level metadata carried alongside the entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    #[serde(rename = "schemaVersion")]
    pub schema_version: String,

    /// Category descriptors the viewer renders filters from
    #[serde(default)]
    pub categories: Vec<CategoryDescriptor>,
}

impl Default for CollectionMetadata {
    fn default() -> Self {
        Self {
            schema_version: "1.0".to_string(),
            categories: Vec::new(),
        }
    }
}

/// One category descriptor in the catalog metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The persisted catalog of document entries
///
/// Invariant: no two entries share a `url`. The deduplication set is rebuilt
/// from `pdfs` on load and maintained by [`Collection::merge`]; it is never
/// serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "lastValidated")]
    pub last_validated: DateTime<Utc>,

    #[serde(default)]
    pub metadata: CollectionMetadata,

    /// Entries in discovery order
    #[serde(default)]
    pub pdfs: Vec<DocumentEntry>,

    #[serde(skip)]
    known_urls: HashSet<String>,
}

impl Collection {
    /// Creates an empty collection stamped with the current time
    pub fn new() -> Self {
        Self {
            last_validated: Utc::now(),
            metadata: CollectionMetadata::default(),
            pdfs: Vec::new(),
            known_urls: HashSet::new(),
        }
    }

    /// Rebuilds the dedup set from the entry list
    ///
    /// Must be called after deserializing, since the set is not persisted.
    pub(crate) fn rebuild_index(&mut self) {
        self.known_urls = self.pdfs.iter().map(|e| e.url.clone()).collect();
    }

    /// Returns true when an entry with this URL is already cataloged
    pub fn contains_url(&self, url: &str) -> bool {
        self.known_urls.contains(url)
    }

    /// Appends the entry unless its URL is already present
    ///
    /// The check-and-insert is a single operation on the collection, so the
    /// dedup invariant holds for every merge sequence. Returns whether the
    /// entry was applied; merging the same URL twice applies only the first.
    pub fn merge(&mut self, entry: DocumentEntry) -> bool {
        if self.known_urls.contains(&entry.url) {
            return false;
        }

        self.known_urls.insert(entry.url.clone());
        self.pdfs.push(entry);
        true
    }

    /// Number of cataloged entries
    pub fn len(&self) -> usize {
        self.pdfs.len()
    }

    /// Returns true when no entries are cataloged
    pub fn is_empty(&self) -> bool {
        self.pdfs.is_empty()
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}
