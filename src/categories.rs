//! Category collaborator: keyword matching and schema normalization
//!
//! Pure lookup utilities consumed by the pipeline. The category list lives
//! in a shared JSON configuration file so the viewer application and this
//! tool stay consistent; when the file is missing or unreadable a built-in
//! default is substituted.

use crate::collection::{CategoryDescriptor, DocumentEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One category with its matching keywords
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The centralized categories configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesConfig {
    pub version: String,

    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(rename = "searchSuffixes", default)]
    pub search_suffixes: Vec<String>,
}

impl CategoriesConfig {
    /// Loads the configuration, substituting the default on any failure
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(
                    "No categories configuration at {} ({}), using defaults",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Categories configuration at {} is invalid ({}), using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Detects category IDs whose keywords appear in the text
    ///
    /// Matching is case-insensitive substring containment; each category
    /// matches at most once, in configuration order.
    pub fn detect_categories(&self, text: &str) -> Vec<String> {
        let text_lower = text.to_lowercase();
        let mut matches = Vec::new();

        for category in &self.categories {
            let hit = category
                .keywords
                .iter()
                .any(|keyword| text_lower.contains(&keyword.to_lowercase()));

            if hit && !matches.contains(&category.id) {
                matches.push(category.id.clone());
            }
        }

        matches
    }

    /// Generates search queries for a category (keyword × suffix)
    pub fn generate_search_queries(&self, category_id: &str) -> Vec<String> {
        let category = match self.categories.iter().find(|c| c.id == category_id) {
            Some(c) => c,
            None => return Vec::new(),
        };

        let mut queries = Vec::new();
        for keyword in &category.keywords {
            for suffix in &self.search_suffixes {
                queries.push(format!("{} {}", keyword, suffix));
            }
        }
        queries
    }

    /// Descriptors for the catalog metadata block
    pub fn descriptors(&self) -> Vec<CategoryDescriptor> {
        self.categories
            .iter()
            .map(|c| CategoryDescriptor {
                id: c.id.clone(),
                name: c.name.clone(),
                color: c.color.clone(),
            })
            .collect()
    }
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            last_updated: Utc::now(),
            categories: vec![
                Category {
                    id: "ai".to_string(),
                    name: "Artificial Intelligence".to_string(),
                    keywords: vec!["machine learning".to_string(), "AI".to_string()],
                    color: Some("#3498db".to_string()),
                },
                Category {
                    id: "programming".to_string(),
                    name: "Programming".to_string(),
                    keywords: vec!["javascript".to_string(), "python".to_string()],
                    color: Some("#2ecc71".to_string()),
                },
            ],
            search_suffixes: vec!["filetype:pdf".to_string()],
        }
    }
}

/// Fills viewer-schema defaults into an entry's optional fields
///
/// The fixed-schema struct makes field presence static, so only values the
/// viewer expects to be non-null need filling.
pub fn ensure_schema_compatibility(mut entry: DocumentEntry) -> DocumentEntry {
    if entry.author.is_none() {
        entry.author = Some("Unknown".to_string());
    }
    if entry.title.is_empty() {
        entry.title = "Untitled PDF".to_string();
    }
    entry
}
