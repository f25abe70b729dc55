//! Permissive snippet input and its normalization into canonical records.

use crate::constants::UNCATEGORIZED;
use crate::models::snippet::{now_stamp, Snippet, SubSnippet};
use serde::{Deserialize, Serialize};

/// Loosely-typed snippet input from a save form, import file, or store read.
///
/// Every field is optional and tolerant of legacy shapes: `tags` accepts
/// either a JSON array or a raw comma-separated string, and the singular
/// `category` field from pre-multi-category records is honored. Deserialize
/// then call [`SnippetDraft::normalize`]; unknown extra fields are ignored
/// here and stripped again by gateway sanitization before persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<TagInput>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub snippets: Option<Vec<SubSnippet>>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Tag input accepted as an array or a raw comma-separated string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagInput {
    List(Vec<String>),
    Raw(String),
}

impl SnippetDraft {
    /// Coerce this draft into a fully-populated [`Snippet`].
    ///
    /// Total: never fails, whatever the input. Applies the data-model
    /// invariants: non-empty `categories` (legacy singular fallback, then
    /// `Uncategorized`), legacy `category` equal to `categories[0]`,
    /// case-insensitively de-duplicated tags with first-seen casing, and the
    /// multi-snippet form taking precedence over the single `code` body.
    /// Missing timestamps are stamped with the current instant.
    pub fn normalize(self) -> Snippet {
        let snippets = self.snippets.unwrap_or_default();
        let code = if snippets.is_empty() {
            self.code.unwrap_or_default()
        } else {
            // Toggle-exclusive design: the multi-snippet form wins.
            String::new()
        };

        let mut categories: Vec<String> = self
            .categories
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if categories.is_empty() {
            let legacy = self
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNCATEGORIZED.to_string());
            categories.push(legacy);
        }
        let category = categories[0].clone();

        let now = now_stamp();
        let created_at = self
            .created_at
            .filter(|stamp| !stamp.trim().is_empty())
            .unwrap_or_else(|| now.clone());
        let updated_at = self
            .updated_at
            .filter(|stamp| !stamp.trim().is_empty())
            .unwrap_or(now);

        Snippet {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category,
            categories,
            tags: dedup_tags(self.tags),
            language: self.language.unwrap_or_default(),
            code,
            snippets,
            is_favorite: self.is_favorite.unwrap_or(false),
            created_at,
            updated_at,
            user_id: self.user_id.unwrap_or_default(),
        }
    }
}

impl From<&Snippet> for SnippetDraft {
    fn from(snippet: &Snippet) -> Self {
        Self {
            id: (!snippet.id.is_empty()).then(|| snippet.id.clone()),
            title: Some(snippet.title.clone()),
            description: Some(snippet.description.clone()),
            category: Some(snippet.category.clone()),
            categories: Some(snippet.categories.clone()),
            tags: Some(TagInput::List(snippet.tags.clone())),
            language: Some(snippet.language.clone()),
            code: Some(snippet.code.clone()),
            snippets: Some(snippet.snippets.clone()),
            is_favorite: Some(snippet.is_favorite),
            created_at: Some(snippet.created_at.clone()),
            updated_at: Some(snippet.updated_at.clone()),
            user_id: Some(snippet.user_id.clone()),
        }
    }
}

/// Split, trim, and case-insensitively de-duplicate tag input.
///
/// First-seen casing is preserved for display; later duplicates that differ
/// only by case are dropped.
fn dedup_tags(input: Option<TagInput>) -> Vec<String> {
    let raw: Vec<String> = match input {
        Some(TagInput::List(list)) => list,
        Some(TagInput::Raw(text)) => text.split(',').map(str::to_string).collect(),
        None => Vec::new(),
    };

    let mut seen: Vec<String> = Vec::new();
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        let folded = tag.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        tags.push(tag.to_string());
    }
    tags
}
