//! Remote API surface: the typed operation set and its HTTP implementation.
//!
//! All other components depend on the `NotesApi` trait and never issue raw
//! HTTP calls themselves.

mod client;
mod error;

#[cfg(test)]
pub(crate) mod mock;

pub use client::ApiClient;
pub use error::ApiError;

use async_trait::async_trait;

use crate::models::{AuthResponse, Filter, Folder, Note, NotePayload, Tag, User};

/// The full operation set of the notes_database backend.
///
/// One method per endpoint; every authenticated call takes the bearer token
/// explicitly so the transport stays stateless.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;
    async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;
    async fn logout(&self, token: &str) -> Result<(), ApiError>;
    async fn me(&self, token: &str) -> Result<User, ApiError>;

    async fn list_notes(&self, token: &str, filter: &Filter) -> Result<Vec<Note>, ApiError>;
    async fn get_note(&self, token: &str, id: &str) -> Result<Note, ApiError>;
    async fn create_note(&self, token: &str, payload: &NotePayload) -> Result<Note, ApiError>;
    async fn update_note(
        &self,
        token: &str,
        id: &str,
        payload: &NotePayload,
    ) -> Result<Note, ApiError>;
    async fn delete_note(&self, token: &str, id: &str) -> Result<(), ApiError>;

    async fn list_folders(&self, token: &str) -> Result<Vec<Folder>, ApiError>;
    async fn create_folder(&self, token: &str, name: &str) -> Result<Folder, ApiError>;
    async fn list_tags(&self, token: &str) -> Result<Vec<Tag>, ApiError>;
}
