//! Durable storage for the session credential.
//!
//! The persisted token is the only durable state in the client. It is
//! written and removed exclusively by the session manager; presence or
//! absence at startup is the sole signal consulted when restoring.

use std::io;
use std::path::PathBuf;

pub trait TokenStore: Send + Sync {
    /// The persisted token, if any. Read failures are treated as absence.
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// File-backed token store: one token string in one file.
pub struct FsTokenStore {
    path: PathBuf,
}

impl FsTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FsTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("[TokenStore] Failed to read {:?}: {}", self.path, e);
                }
                None
            }
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-memory store for tests.
#[cfg(test)]
pub(crate) struct MemTokenStore {
    token: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemTokenStore {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: std::sync::Mutex::new(token.map(str::to_string)),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}
