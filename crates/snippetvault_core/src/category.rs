//! Category lifecycle: add, reorder, delete with cascade planning.

use crate::constants::{is_protected_category, ALL_CATEGORY, DEFAULT_CATEGORIES};
use crate::error::VaultError;
use crate::models::snippet::Snippet;
use serde::{Deserialize, Serialize};

/// Explicit category state passed to the view engine and engine operations.
///
/// Held and threaded as a value rather than ambient state so every operation
/// on it stays unit-testable; persistence goes through the preferences
/// adapter, not this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryState {
    /// Ordered category names as shown in the tab strip.
    pub order: Vec<String>,
    /// The currently selected tab.
    pub active: String,
}

/// Outcome of an [`CategoryState::add`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
}

/// Work produced by a category deletion: the name removed plus every snippet
/// rewritten by the cascade, ready to be persisted one by one.
#[derive(Debug, Clone)]
pub struct CascadePlan {
    pub removed: String,
    pub rewrites: Vec<Snippet>,
}

impl Default for CategoryState {
    fn default() -> Self {
        Self {
            order: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            active: ALL_CATEGORY.to_string(),
        }
    }
}

impl CategoryState {
    pub fn new(order: Vec<String>) -> Self {
        Self {
            order,
            active: ALL_CATEGORY.to_string(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.order.iter().any(|c| c == name)
    }

    /// Append a new category; exact case-sensitive match counts as existing.
    pub fn add(&mut self, name: &str) -> AddOutcome {
        if self.contains(name) {
            return AddOutcome::AlreadyExists;
        }
        self.order.push(name.to_string());
        AddOutcome::Added
    }

    /// Replace the stored order wholesale.
    ///
    /// The protected-category non-move constraint is the caller's to uphold;
    /// drag handles are disabled on protected names at the UI boundary and
    /// this manager does not re-validate it.
    pub fn reorder(&mut self, new_order: Vec<String>) {
        self.order = new_order;
    }

    /// Append any category names from `categories` not yet in the order.
    ///
    /// Implicit creation path: saving or importing a snippet that references
    /// an unknown name materializes it.
    ///
    /// # Returns
    /// The names that were newly added, in input order.
    pub fn ensure_known(&mut self, categories: &[String]) -> Vec<String> {
        let mut added = Vec::new();
        for name in categories {
            if !self.contains(name) {
                self.order.push(name.clone());
                added.push(name.clone());
            }
        }
        added
    }

    /// Remove a category and plan the cascade over the affected snippets.
    ///
    /// Rejected for protected names, leaving the state unchanged. When the
    /// deleted name was the active tab, the active tab resets to `All`. The
    /// returned plan carries a rewritten copy of every snippet whose
    /// categories contained the name; persisting those copies is the
    /// caller's job, one update per snippet, best effort.
    ///
    /// # Errors
    /// [`VaultError::ProtectedCategory`] for protected names and
    /// [`VaultError::CategoryNotFound`] when the name is not in the order.
    pub fn delete(&mut self, name: &str, snippets: &[Snippet]) -> Result<CascadePlan, VaultError> {
        if is_protected_category(name) {
            return Err(VaultError::ProtectedCategory(name.to_string()));
        }
        if !self.contains(name) {
            return Err(VaultError::CategoryNotFound(name.to_string()));
        }

        self.order.retain(|c| c != name);
        if self.active == name {
            self.active = ALL_CATEGORY.to_string();
        }

        let rewrites = snippets
            .iter()
            .filter(|s| s.in_category(name))
            .map(|s| {
                let mut rewritten = s.clone();
                rewritten.strip_category(name);
                rewritten
            })
            .collect();

        Ok(CascadePlan {
            removed: name.to_string(),
            rewrites,
        })
    }
}
