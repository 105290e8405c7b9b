//! Reference collections of folders and tags for the current session.
//!
//! Both collections are replaced wholesale by `reload`; the two fetches are
//! independent, so a failure of one never corrupts the other's existing
//! data. Folder creation inserts a provisional entry first and reconciles
//! it against the server's answer, so the sidebar can show the folder
//! immediately without fabricating a permanent local record.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::{ApiError, NotesApi};
use crate::models::{Folder, Tag};

#[derive(Debug, Default)]
struct CatalogState {
    folders: Vec<Folder>,
    tags: Vec<Tag>,
    last_error: Option<String>,
}

pub struct CatalogStore {
    api: Arc<dyn NotesApi>,
    state: RwLock<CatalogState>,
}

impl CatalogStore {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self {
            api,
            state: RwLock::new(CatalogState::default()),
        }
    }

    pub fn folders(&self) -> Vec<Folder> {
        self.state.read().folders.clone()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.state.read().tags.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    /// Fetch folders and tags, replacing each collection only when its own
    /// fetch succeeds. Provisional folders are superseded by the
    /// authoritative list.
    pub async fn reload(&self, token: &str) {
        let (folders, tags) = tokio::join!(
            self.api.list_folders(token),
            self.api.list_tags(token),
        );

        let mut state = self.state.write();
        match folders {
            Ok(folders) => {
                state.folders = folders;
                state.last_error = None;
            }
            Err(e) => {
                log::warn!("[Catalog] Folder reload failed: {}", e);
                state.last_error = Some(e.to_string());
            }
        }
        match tags {
            Ok(tags) => state.tags = tags,
            Err(e) => {
                log::warn!("[Catalog] Tag reload failed: {}", e);
                state.last_error = Some(e.to_string());
            }
        }
    }

    /// Insert a provisional folder with a locally generated id. It is
    /// superseded by the next authoritative reload.
    pub fn add_folder_local(&self, name: &str) -> Folder {
        let folder = Folder {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            provisional: true,
        };
        self.state.write().folders.push(folder.clone());
        folder
    }

    /// Create a folder server-side, showing it optimistically while the
    /// call is in flight. On success the provisional entry is replaced by
    /// the confirmed folder; on failure it is rolled back.
    pub async fn create_folder(&self, token: &str, name: &str) -> Result<Folder, ApiError> {
        let provisional = self.add_folder_local(name);

        match self.api.create_folder(token, name).await {
            Ok(folder) => {
                let mut state = self.state.write();
                if let Some(entry) = state.folders.iter_mut().find(|f| f.id == provisional.id) {
                    *entry = folder.clone();
                }
                state.last_error = None;
                Ok(folder)
            }
            Err(e) => {
                log::warn!("[Catalog] Folder create failed, rolling back: {}", e);
                let mut state = self.state.write();
                state.folders.retain(|f| f.id != provisional.id);
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Resolve a note's folder reference for display. Notes hold weak
    /// references, so a folder deleted server-side simply falls back to
    /// "None".
    pub fn folder_name(&self, folder_id: Option<&str>) -> String {
        let state = self.state.read();
        folder_id
            .and_then(|id| state.folders.iter().find(|f| f.id == id))
            .map(|f| f.name.clone())
            .unwrap_or_else(|| "None".to_string())
    }

    /// Drop all derived state, e.g. on logout.
    pub fn clear(&self) {
        *self.state.write() = CatalogState::default();
    }
}
