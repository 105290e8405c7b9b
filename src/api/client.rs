//! HTTP implementation of the `NotesApi` trait.
//!
//! A single request primitive builds every call (method, path, bearer token,
//! JSON body, query string) and normalizes the outcome into `ApiError`:
//! 401 is always `Unauthorized`, any other non-2xx becomes `RequestFailed`
//! with the server's JSON `message` when one can be parsed, and 204 is a
//! successful empty result.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use super::{ApiError, NotesApi};
use crate::models::{AuthResponse, Filter, Folder, Note, NotePayload, Tag, User};

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// `base_url` is the backend root, e.g. `https://notes.example.com/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// The sole point of contact with the network.
    async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
        query: &[(&'static str, String)],
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut req = self.client.request(method, &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let fallback = status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string();
            let body_text = resp.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed(error_message(&body_text, &fallback)));
        }

        Ok(resp)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let resp = self.request(method, path, token, body, query).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::RequestFailed(format!("Invalid response JSON: {}", e)))
    }

    /// For endpoints whose success result carries no body (or 204).
    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.request(method, path, token, None, &[]).await?;
        Ok(())
    }
}

/// Extract a human-readable message from an error response body: the JSON
/// `message` field when present, the whole JSON otherwise, or the supplied
/// status text when the body is not JSON at all.
fn error_message(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => json
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| json.to_string()),
        Err(_) => fallback.to_string(),
    }
}

/// Query pairs for the note list endpoint. Empty parts are omitted entirely.
fn filter_query(filter: &Filter) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(ref folder) = filter.folder {
        query.push(("folder", folder.clone()));
    }
    if let Some(ref tag) = filter.tag {
        query.push(("tag", tag.clone()));
    }
    if !filter.search.is_empty() {
        query.push(("search", filter.search.clone()));
    }
    query
}

fn credentials_body(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}

fn payload_body(payload: &NotePayload) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::RequestFailed(format!("Invalid note payload: {}", e)))
}

#[async_trait]
impl NotesApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.request_json(
            Method::POST,
            "/auth/login",
            None,
            Some(credentials_body(email, password)),
            &[],
        )
        .await
    }

    async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.request_json(
            Method::POST,
            "/auth/register",
            None,
            Some(credentials_body(email, password)),
            &[],
        )
        .await
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.request_empty(Method::POST, "/auth/logout", Some(token))
            .await
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        self.request_json(Method::GET, "/auth/me", Some(token), None, &[])
            .await
    }

    async fn list_notes(&self, token: &str, filter: &Filter) -> Result<Vec<Note>, ApiError> {
        self.request_json(Method::GET, "/notes", Some(token), None, &filter_query(filter))
            .await
    }

    async fn get_note(&self, token: &str, id: &str) -> Result<Note, ApiError> {
        self.request_json(Method::GET, &format!("/notes/{}", id), Some(token), None, &[])
            .await
    }

    async fn create_note(&self, token: &str, payload: &NotePayload) -> Result<Note, ApiError> {
        self.request_json(
            Method::POST,
            "/notes",
            Some(token),
            Some(payload_body(payload)?),
            &[],
        )
        .await
    }

    async fn update_note(
        &self,
        token: &str,
        id: &str,
        payload: &NotePayload,
    ) -> Result<Note, ApiError> {
        self.request_json(
            Method::PUT,
            &format!("/notes/{}", id),
            Some(token),
            Some(payload_body(payload)?),
            &[],
        )
        .await
    }

    async fn delete_note(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.request_empty(Method::DELETE, &format!("/notes/{}", id), Some(token))
            .await
    }

    async fn list_folders(&self, token: &str) -> Result<Vec<Folder>, ApiError> {
        self.request_json(Method::GET, "/folders", Some(token), None, &[])
            .await
    }

    async fn create_folder(&self, token: &str, name: &str) -> Result<Folder, ApiError> {
        self.request_json(
            Method::POST,
            "/folders",
            Some(token),
            Some(serde_json::json!({ "name": name })),
            &[],
        )
        .await
    }

    async fn list_tags(&self, token: &str) -> Result<Vec<Tag>, ApiError> {
        self.request_json(Method::GET, "/tags", Some(token), None, &[])
            .await
    }
}
