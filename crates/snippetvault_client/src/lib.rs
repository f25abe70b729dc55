//! Client-side synchronization engine for SnippetVault.
//!
//! Consumes two capabilities, a remote document store and an identity
//! provider, and layers the session, gateway, and optimistic-update sync
//! engine on top of the pure domain logic in `snippetvault_core`.

/// Identity capability, auth errors, and user-facing message tables.
pub mod auth;
/// The sync engine: local collection state plus derived-view access.
pub mod engine;
/// Session ownership of the current identity, with admin operations.
pub mod session;
/// Remote document store capability and the snippet gateway.
pub mod store;

pub use engine::VaultEngine;
pub use session::Session;
pub use store::{SnippetGateway, StoreError};
