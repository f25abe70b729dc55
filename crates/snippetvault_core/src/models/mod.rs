//! Data models for snippets and user profiles.

/// Permissive input shape and normalization into canonical records.
pub mod draft;
/// Canonical snippet record and timestamp helpers.
pub mod snippet;
/// User profile, role, and account statistics.
pub mod user;
#[cfg(test)]
mod tests;
