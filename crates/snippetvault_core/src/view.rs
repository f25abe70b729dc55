//! Derived-view computation: category, search, and filter predicates plus sort.

use crate::constants::{ALL_CATEGORY, FAVOURITE_CATEGORY};
use crate::models::snippet::Snippet;
use serde::{Deserialize, Serialize};

/// Ephemeral filter state; not persisted with snippets themselves, but the
/// defaults survive reloads through the preferences store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    /// Exact language match when non-empty.
    pub language: String,
    /// Require a non-blank description.
    pub has_description: bool,
    /// Require the multi-snippet form.
    pub has_multiple_snippets: bool,
    pub sort_by: SortKey,
}

/// Sort order for the derived list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
    Updated,
}

/// Compute the filtered, sorted snippet list shown to the user.
///
/// Pure function of its four inputs; never mutates `collection` and is safe
/// to memoize on them. Predicates apply in order: active category, search
/// term, then the boolean/language filters; survivors are stably sorted by
/// `filters.sort_by`. Unparseable timestamps sort as the epoch.
pub fn derive_view(
    collection: &[Snippet],
    active_category: &str,
    search_term: &str,
    filters: &Filters,
) -> Vec<Snippet> {
    let needle = search_term.to_lowercase();
    let mut view: Vec<Snippet> = collection
        .iter()
        .filter(|s| matches_category(s, active_category))
        .filter(|s| matches_search(s, &needle))
        .filter(|s| filters.language.is_empty() || s.language == filters.language)
        .filter(|s| !filters.has_description || !s.description.trim().is_empty())
        .filter(|s| !filters.has_multiple_snippets || !s.snippets.is_empty())
        .cloned()
        .collect();

    match filters.sort_by {
        SortKey::Oldest => view.sort_by_key(|s| s.created_instant()),
        SortKey::Alphabetical => {
            view.sort_by(|a, b| compare_titles(&a.title, &b.title));
        }
        SortKey::Updated => {
            view.sort_by_key(|s| std::cmp::Reverse(s.updated_instant()));
        }
        SortKey::Newest => {
            view.sort_by_key(|s| std::cmp::Reverse(s.created_instant()));
        }
    }
    view
}

fn matches_category(snippet: &Snippet, active: &str) -> bool {
    if active == ALL_CATEGORY {
        return true;
    }
    if active == FAVOURITE_CATEGORY {
        return snippet.is_favorite;
    }
    snippet.in_category(active)
}

/// Case-insensitive substring match over title, description, and tags.
fn matches_search(snippet: &Snippet, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    snippet.title.to_lowercase().contains(needle)
        || snippet.description.to_lowercase().contains(needle)
        || snippet
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Case-aware title ordering: compared case-insensitively first, with the
/// raw comparison as a deterministic tie-break.
fn compare_titles(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
