//! Scripted in-memory `NotesApi` used by component tests.
//!
//! Every call is recorded; results are cloned from per-endpoint slots so a
//! test can script failures. `notes_queue` additionally supports per-response
//! delays for exercising out-of-order reload resolution.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{ApiError, NotesApi};
use crate::models::{AuthResponse, Filter, Folder, Note, NotePayload, Tag, User};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ApiCall {
    Login { email: String },
    Register { email: String },
    Logout,
    Me,
    ListNotes { filter: Filter },
    GetNote { id: String },
    CreateNote { payload: NotePayload },
    UpdateNote { id: String, payload: NotePayload },
    DeleteNote { id: String },
    ListFolders,
    CreateFolder { name: String },
    ListTags,
}

pub(crate) struct MockApi {
    pub calls: Mutex<Vec<ApiCall>>,
    pub auth_result: Mutex<Result<AuthResponse, ApiError>>,
    pub me_result: Mutex<Result<User, ApiError>>,
    pub logout_result: Mutex<Result<(), ApiError>>,
    /// Per-call `(delay_ms, result)` responses; an empty queue answers `Ok(vec![])`.
    pub notes_queue: Mutex<VecDeque<(u64, Result<Vec<Note>, ApiError>)>>,
    pub note_result: Mutex<Result<Note, ApiError>>,
    pub delete_result: Mutex<Result<(), ApiError>>,
    pub folders_result: Mutex<Result<Vec<Folder>, ApiError>>,
    pub create_folder_result: Mutex<Result<Folder, ApiError>>,
    pub tags_result: Mutex<Result<Vec<Tag>, ApiError>>,
}

pub(crate) fn sample_user() -> User {
    User {
        id: "u1".into(),
        email: "a@b.com".into(),
    }
}

pub(crate) fn sample_note(id: &str) -> Note {
    Note {
        id: id.into(),
        title: format!("note {}", id),
        body: "<p>body</p>".into(),
        folder: None,
        tags: Vec::new(),
        updated_at: None,
        snippet: None,
    }
}

pub(crate) fn sample_folder(id: &str, name: &str) -> Folder {
    Folder {
        id: id.into(),
        name: name.into(),
        provisional: false,
    }
}

pub(crate) fn sample_tag(id: &str, name: &str) -> Tag {
    Tag {
        id: id.into(),
        name: name.into(),
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            auth_result: Mutex::new(Ok(AuthResponse {
                token: "tok-1".into(),
                user: sample_user(),
            })),
            me_result: Mutex::new(Ok(sample_user())),
            logout_result: Mutex::new(Ok(())),
            notes_queue: Mutex::new(VecDeque::new()),
            note_result: Mutex::new(Ok(sample_note("n-new"))),
            delete_result: Mutex::new(Ok(())),
            folders_result: Mutex::new(Ok(vec![sample_folder("f1", "Work")])),
            create_folder_result: Mutex::new(Ok(sample_folder("f-srv", "Inbox"))),
            tags_result: Mutex::new(Ok(vec![sample_tag("t1", "x"), sample_tag("t2", "y")])),
        }
    }
}

impl MockApi {
    pub fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn recorded(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count<F: Fn(&ApiCall) -> bool>(&self, pred: F) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }
}

#[async_trait]
impl NotesApi for MockApi {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
        self.record(ApiCall::Login { email: email.into() });
        self.auth_result.lock().unwrap().clone()
    }

    async fn register(&self, email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
        self.record(ApiCall::Register { email: email.into() });
        self.auth_result.lock().unwrap().clone()
    }

    async fn logout(&self, _token: &str) -> Result<(), ApiError> {
        self.record(ApiCall::Logout);
        self.logout_result.lock().unwrap().clone()
    }

    async fn me(&self, _token: &str) -> Result<User, ApiError> {
        self.record(ApiCall::Me);
        self.me_result.lock().unwrap().clone()
    }

    async fn list_notes(&self, _token: &str, filter: &Filter) -> Result<Vec<Note>, ApiError> {
        self.record(ApiCall::ListNotes { filter: filter.clone() });
        let next = self.notes_queue.lock().unwrap().pop_front();
        match next {
            Some((delay_ms, result)) => {
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                result
            }
            None => Ok(Vec::new()),
        }
    }

    async fn get_note(&self, _token: &str, id: &str) -> Result<Note, ApiError> {
        self.record(ApiCall::GetNote { id: id.into() });
        self.note_result.lock().unwrap().clone()
    }

    async fn create_note(&self, _token: &str, payload: &NotePayload) -> Result<Note, ApiError> {
        self.record(ApiCall::CreateNote { payload: payload.clone() });
        self.note_result.lock().unwrap().clone()
    }

    async fn update_note(
        &self,
        _token: &str,
        id: &str,
        payload: &NotePayload,
    ) -> Result<Note, ApiError> {
        self.record(ApiCall::UpdateNote {
            id: id.into(),
            payload: payload.clone(),
        });
        self.note_result.lock().unwrap().clone()
    }

    async fn delete_note(&self, _token: &str, id: &str) -> Result<(), ApiError> {
        self.record(ApiCall::DeleteNote { id: id.into() });
        self.delete_result.lock().unwrap().clone()
    }

    async fn list_folders(&self, _token: &str) -> Result<Vec<Folder>, ApiError> {
        self.record(ApiCall::ListFolders);
        self.folders_result.lock().unwrap().clone()
    }

    async fn create_folder(&self, _token: &str, name: &str) -> Result<Folder, ApiError> {
        self.record(ApiCall::CreateFolder { name: name.into() });
        self.create_folder_result.lock().unwrap().clone()
    }

    async fn list_tags(&self, _token: &str) -> Result<Vec<Tag>, ApiError> {
        self.record(ApiCall::ListTags);
        self.tags_result.lock().unwrap().clone()
    }
}
