//! Shared application state.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the card store and the user registry.

use std::sync::Arc;

use cashcard_storage::CardStore;

use crate::users::UserRegistry;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Card record storage.
    pub store: Arc<dyn CardStore>,
    /// Known users for Basic authentication.
    pub users: UserRegistry,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
