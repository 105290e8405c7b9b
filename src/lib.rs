//! Session and data-synchronization client for the notes_database backend.
//!
//! The crate covers everything between a rendering layer and the remote
//! store: establishing and restoring an authenticated session, keeping an
//! in-memory projection of notes/folders/tags consistent with the user's
//! filter, and serializing create/update/delete calls with reconciliation
//! afterward. Rendering and the rich-text editing surface are consumers of
//! this crate, not part of it.

pub mod api;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;
pub mod token_store;
pub mod workspace;

use std::sync::Arc;

use api::{ApiClient, ApiError, NotesApi};
use catalog::CatalogStore;
use config::Config;
use models::{Folder, NoteDraft};
use session::SessionManager;
use token_store::{FsTokenStore, TokenStore};
use workspace::NoteWorkspace;

/// Explicitly constructed application state: one shared API client behind
/// the session manager, catalog store, and note workspace.
///
/// The session manager is constructed (and consulted) first; catalog and
/// workspace only ever act with a token it supplies. User intents that
/// arrive without an authenticated session are ignored, matching the view
/// layer showing the login form in that state.
pub struct AppContext {
    pub session: SessionManager,
    pub catalog: CatalogStore,
    pub workspace: NoteWorkspace,
}

impl AppContext {
    pub fn from_config(config: &Config) -> Self {
        let api: Arc<dyn NotesApi> = Arc::new(ApiClient::new(&config.api_base_url));
        let tokens: Arc<dyn TokenStore> = Arc::new(FsTokenStore::new(config.token_file.clone()));
        Self::new(api, tokens)
    }

    pub fn new(api: Arc<dyn NotesApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            session: SessionManager::new(api.clone(), tokens),
            catalog: CatalogStore::new(api.clone()),
            workspace: NoteWorkspace::new(api),
        }
    }

    /// Startup sequence: restore the persisted session, then load the
    /// catalog and note list when a session came back.
    pub async fn start(&self) {
        self.session.restore().await;
        self.refresh().await;
    }

    /// Reload catalog and notes with the current token, if any.
    pub async fn refresh(&self) {
        if let Some(token) = self.session.token() {
            tokio::join!(self.catalog.reload(&token), self.workspace.reload(&token));
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.session.login(email, password).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.session.register(email, password).await?;
        self.refresh().await;
        Ok(())
    }

    /// End the session and tear down all derived state, not just the token.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.catalog.clear();
        self.workspace.clear();
    }

    pub async fn set_search(&self, search: &str) {
        self.workspace.set_search(search);
        self.reload_notes().await;
    }

    pub async fn select_folder(&self, folder: Option<String>) {
        self.workspace.select_folder(folder);
        self.reload_notes().await;
    }

    pub async fn select_tag(&self, tag: Option<String>) {
        self.workspace.select_tag(tag);
        self.reload_notes().await;
    }

    pub async fn save_note(&self, draft: &NoteDraft) {
        if let Some(token) = self.session.token() {
            self.workspace.save(&token, draft).await;
        }
    }

    pub async fn remove_selected(&self, confirmed: bool) {
        if let Some(token) = self.session.token() {
            self.workspace.remove_selected(&token, confirmed).await;
        }
    }

    pub async fn create_folder(&self, name: &str) -> Result<Folder, ApiError> {
        let Some(token) = self.session.token() else {
            return Err(ApiError::Unauthorized);
        };
        self.catalog.create_folder(&token, name).await
    }

    async fn reload_notes(&self) {
        if let Some(token) = self.session.token() {
            self.workspace.reload(&token).await;
        }
    }
}
