//! Core domain library for SnippetVault (models, filtering, categories).

/// Category lifecycle state and cascade planning.
pub mod category;
/// Configuration loading and defaults.
pub mod config;
/// Shared name and default-value constants.
pub mod constants;
/// Pattern-based language detection for snippet bodies.
pub mod detection;
/// Application error types (domain/persistence).
pub mod error;
/// Backup export and import of snippet collections.
pub mod export;
/// Data models for snippets and user profiles.
pub mod models;
/// Per-user persistence of category order and filter defaults.
pub mod prefs;
/// Storage payload sanitization.
pub mod sanitize;
/// Derived-view computation (search, filters, sort).
pub mod view;

pub use config::Config;
pub use error::VaultError;
pub use models::snippet::Snippet;
