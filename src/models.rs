//! Wire and state models shared across the client.
//!
//! Everything here mirrors what the notes_database backend sends; collections
//! are replaced wholesale on reload, never patched in place. The note body is
//! opaque markup owned by the editing surface: it is transported verbatim and
//! never parsed by this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user snapshot. Replaced wholesale on every session refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// A folder for classifying notes.
///
/// `provisional` is client-local state: true for a locally inserted folder
/// awaiting confirmation from the server, superseded by the next reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub provisional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// A note as returned by the server. The authoritative copy always lives
/// remotely; this is the projection held while loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// Transient editor copy of a note. Discarded on cancel, submitted wholesale
/// on save. `id` is absent for a note being created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    pub folder: Option<String>,
    pub tags: Vec<Tag>,
}

impl NoteDraft {
    /// Normalize the draft for submission: tags become bare names and an
    /// absent folder is sent as an explicit null.
    pub fn to_payload(&self) -> NotePayload {
        NotePayload {
            title: self.title.clone(),
            body: self.body.clone(),
            folder: self.folder.clone(),
            tags: self.tags.iter().map(|t| t.name.clone()).collect(),
        }
    }
}

/// Request body for note create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotePayload {
    pub title: String,
    pub body: String,
    pub folder: Option<String>,
    pub tags: Vec<String>,
}

/// Successful response from the login and register endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// The user-selected restriction on the visible note collection.
///
/// At most one of `folder` and `tag` is set; selecting one clears the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub search: String,
    pub folder: Option<String>,
    pub tag: Option<String>,
}

impl Filter {
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Select a folder, clearing any active tag selection.
    pub fn select_folder(&mut self, folder: Option<String>) {
        if folder.is_some() {
            self.tag = None;
        }
        self.folder = folder;
    }

    /// Select a tag, clearing any active folder selection.
    pub fn select_tag(&mut self, tag: Option<String>) {
        if tag.is_some() {
            self.folder = None;
        }
        self.tag = tag;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_folder_and_tag_are_mutually_exclusive() {
        let mut filter = Filter::default();

        filter.select_tag(Some("t1".into()));
        assert_eq!(filter.tag.as_deref(), Some("t1"));

        filter.select_folder(Some("f1".into()));
        assert_eq!(filter.folder.as_deref(), Some("f1"));
        assert_eq!(filter.tag, None);

        filter.select_tag(Some("t2".into()));
        assert_eq!(filter.tag.as_deref(), Some("t2"));
        assert_eq!(filter.folder, None);
    }

    #[test]
    fn clearing_one_side_keeps_the_other() {
        let mut filter = Filter::default();
        filter.select_tag(Some("t1".into()));
        filter.select_folder(None);
        assert_eq!(filter.tag.as_deref(), Some("t1"));
    }

    #[test]
    fn draft_payload_uses_bare_tag_names_and_null_folder() {
        let draft = NoteDraft {
            id: None,
            title: "T".into(),
            body: "<p>B</p>".into(),
            folder: None,
            tags: vec![
                Tag { id: "1".into(), name: "x".into() },
                Tag { id: "2".into(), name: "y".into() },
            ],
        };

        let payload = draft.to_payload();
        assert_eq!(payload.tags, vec!["x".to_string(), "y".to_string()]);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["folder"].is_null());
        assert_eq!(json["tags"], serde_json::json!(["x", "y"]));
    }
}
