//! Root crate facade for the SnippetVault engine and domain types.

pub use snippetvault_client::{
    auth, engine, session, store, Session, SnippetGateway, StoreError, VaultEngine,
};
pub use snippetvault_core::{
    category, constants, detection, export, models, prefs, sanitize, view, Config, Snippet,
    VaultError,
};
