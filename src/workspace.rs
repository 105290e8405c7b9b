//! The filtered note collection and its editing state.
//!
//! The workspace owns the filter (search text plus at most one of folder or
//! tag), the loaded notes, the current selection, and in-flight mutation
//! flags. After every successful mutation the list is re-derived from the
//! server rather than merged optimistically: an extra round trip, but the
//! projection always matches the authoritative store.
//!
//! Reloads carry a monotonically increasing sequence number; a response is
//! discarded if a newer one has already been applied, so the displayed list
//! reflects the most recently issued filter even when responses resolve out
//! of order. No request timeout exists: a call that never resolves leaves
//! the loading or saving flag set until the next user intent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::NotesApi;
use crate::models::{Filter, Note, NoteDraft};

#[derive(Debug, Default)]
struct WorkspaceState {
    filter: Filter,
    notes: Vec<Note>,
    selected: Option<String>,
    editor_open: bool,
    saving: bool,
    loading: bool,
    last_error: Option<String>,
    applied_seq: u64,
}

/// Read-only view of the workspace, cloned out for rendering.
#[derive(Debug, Clone)]
pub struct WorkspaceSnapshot {
    pub filter: Filter,
    pub notes: Vec<Note>,
    pub selected: Option<String>,
    pub editor_open: bool,
    pub saving: bool,
    pub loading: bool,
    pub last_error: Option<String>,
}

pub struct NoteWorkspace {
    api: Arc<dyn NotesApi>,
    state: RwLock<WorkspaceState>,
    reload_seq: AtomicU64,
}

impl NoteWorkspace {
    pub fn new(api: Arc<dyn NotesApi>) -> Self {
        Self {
            api,
            state: RwLock::new(WorkspaceState::default()),
            reload_seq: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        let state = self.state.read();
        WorkspaceSnapshot {
            filter: state.filter.clone(),
            notes: state.notes.clone(),
            selected: state.selected.clone(),
            editor_open: state.editor_open,
            saving: state.saving,
            loading: state.loading,
            last_error: state.last_error.clone(),
        }
    }

    pub fn filter(&self) -> Filter {
        self.state.read().filter.clone()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state.read().notes.clone()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.state.read().selected.clone()
    }

    /// The selected note resolved against the loaded collection.
    pub fn selected_note(&self) -> Option<Note> {
        let state = self.state.read();
        let id = state.selected.as_deref()?;
        state.notes.iter().find(|n| n.id == id).cloned()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    /// Any filter change clears the current selection; the caller follows
    /// up with `reload`.
    pub fn set_search(&self, search: &str) {
        let mut state = self.state.write();
        state.filter.set_search(search);
        state.selected = None;
        state.editor_open = false;
    }

    /// Selecting a folder clears any active tag selection.
    pub fn select_folder(&self, folder: Option<String>) {
        let mut state = self.state.write();
        state.filter.select_folder(folder);
        state.selected = None;
        state.editor_open = false;
    }

    /// Selecting a tag clears any active folder selection.
    pub fn select_tag(&self, tag: Option<String>) {
        let mut state = self.state.write();
        state.filter.select_tag(tag);
        state.selected = None;
        state.editor_open = false;
    }

    /// Select a note and open the detail/editor view.
    pub fn select(&self, id: &str) {
        let mut state = self.state.write();
        state.selected = Some(id.to_string());
        state.editor_open = true;
    }

    /// Open the editor on an empty note shell.
    pub fn start_new(&self) {
        let mut state = self.state.write();
        state.selected = None;
        state.editor_open = true;
    }

    pub fn close_editor(&self) {
        self.state.write().editor_open = false;
    }

    /// Fetch notes matching the current filter and replace the collection.
    ///
    /// A failed reload records the error and keeps the previous collection
    /// visible. A response older than one already applied is discarded.
    pub async fn reload(&self, token: &str) {
        let seq = self.reload_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let filter = {
            let mut state = self.state.write();
            state.loading = true;
            state.filter.clone()
        };

        let result = self.api.list_notes(token, &filter).await;

        let mut state = self.state.write();
        if seq <= state.applied_seq {
            log::debug!("[Workspace] Discarding stale reload response (seq {})", seq);
            return;
        }
        state.applied_seq = seq;
        state.loading = false;
        match result {
            Ok(notes) => {
                state.notes = notes;
                state.last_error = None;
            }
            Err(e) => {
                log::warn!("[Workspace] Note reload failed: {}", e);
                state.last_error = Some(e.to_string());
            }
        }
    }

    /// Submit the editor's draft: update when it carries an id, create
    /// otherwise. On success the editor closes, the returned note becomes
    /// selected, and the list is re-derived from the server. On failure the
    /// editor stays open and the selection is unchanged.
    pub async fn save(&self, token: &str, draft: &NoteDraft) {
        self.state.write().saving = true;

        let payload = draft.to_payload();
        let result = match draft.id.as_deref() {
            Some(id) => self.api.update_note(token, id, &payload).await,
            None => self.api.create_note(token, &payload).await,
        };

        match result {
            Ok(note) => {
                {
                    let mut state = self.state.write();
                    state.saving = false;
                    state.editor_open = false;
                    state.selected = Some(note.id.clone());
                    state.last_error = None;
                }
                self.reload(token).await;
            }
            Err(e) => {
                log::warn!("[Workspace] Save failed: {}", e);
                let mut state = self.state.write();
                state.saving = false;
                state.last_error = Some(e.to_string());
            }
        }
    }

    /// Delete the selected note. `confirmed` is the result of the view
    /// layer's blocking confirmation step; nothing is issued without it.
    pub async fn remove_selected(&self, token: &str, confirmed: bool) {
        if !confirmed {
            return;
        }
        let Some(id) = self.selected_id() else {
            return;
        };

        match self.api.delete_note(token, &id).await {
            Ok(()) => {
                {
                    let mut state = self.state.write();
                    state.editor_open = false;
                    state.selected = None;
                    state.last_error = None;
                }
                self.reload(token).await;
            }
            Err(e) => {
                log::warn!("[Workspace] Delete failed: {}", e);
                self.state.write().last_error = Some(e.to_string());
            }
        }
    }

    /// Fetch the authoritative copy of a single note and refresh it in the
    /// loaded collection, e.g. when the detail view opens. Failure records
    /// the error and leaves the loaded copy as is.
    pub async fn refresh_note(&self, token: &str, id: &str) -> Option<Note> {
        match self.api.get_note(token, id).await {
            Ok(note) => {
                let mut state = self.state.write();
                if let Some(entry) = state.notes.iter_mut().find(|n| n.id == note.id) {
                    *entry = note.clone();
                }
                Some(note)
            }
            Err(e) => {
                log::warn!("[Workspace] Note fetch failed: {}", e);
                self.state.write().last_error = Some(e.to_string());
                None
            }
        }
    }

    /// Drop all derived state, e.g. on logout.
    pub fn clear(&self) {
        *self.state.write() = WorkspaceState::default();
    }
}
