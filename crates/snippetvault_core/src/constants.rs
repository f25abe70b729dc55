//! Names and defaults shared across the vault.

/// Document collection holding snippets in the remote store.
pub const SNIPPET_COLLECTION: &str = "snippets";

/// Document field naming the owning user; the sole list predicate.
pub const OWNER_FIELD: &str = "userId";

/// Virtual category matching every snippet.
pub const ALL_CATEGORY: &str = "All";

/// Virtual category matching favorited snippets.
pub const FAVOURITE_CATEGORY: &str = "Favourite";

/// Fallback category assigned when a snippet would otherwise have none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Categories that can neither be deleted nor drag-reordered.
pub const PROTECTED_CATEGORIES: &[&str] = &[ALL_CATEGORY, FAVOURITE_CATEGORY, UNCATEGORIZED];

/// Category order seeded for a user with no saved preferences.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    ALL_CATEGORY,
    FAVOURITE_CATEGORY,
    "General",
    "Markdown",
    "GitHub",
    "GPT for Study",
    "ADB",
    "CMD",
    "LaTeX",
    UNCATEGORIZED,
];

/// Filename prefix for exported backups.
pub const BACKUP_FILE_PREFIX: &str = "snippetvault-backup-";

/// Returns `true` when `name` is one of the protected category names.
pub fn is_protected_category(name: &str) -> bool {
    PROTECTED_CATEGORIES.contains(&name)
}
