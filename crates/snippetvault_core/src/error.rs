//! Application error types for core domain logic.
use thiserror::Error;

/// Top-level domain error type.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot delete protected category '{0}'")]
    ProtectedCategory(String),

    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Preference storage error: {0}")]
    Prefs(#[from] std::io::Error),
}
