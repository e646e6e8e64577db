use keyring::Entry;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::client::config::ClientConfig;
use crate::client::error::{ClientError, ClientResult};
use crate::client::models::domain::Session;

const SERVICE: &str = "threads_client";
const ACCOUNT: &str = "threads_session";

/// Durable home of the current [`Session`].
///
/// Token and user are always written and cleared as a single record, so a
/// reader never observes one without the other. `clear` is idempotent.
pub trait SessionProvider: Send + Sync {
    fn get(&self) -> Option<Session>;
    fn set(&self, session: Session) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

fn encode(session: &Session) -> ClientResult<String> {
    serde_json::to_string(session).map_err(|e| ClientError::Storage(e.to_string()))
}

fn decode(raw: &str) -> Option<Session> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str::<Session>(raw) {
        Ok(s) if !s.token.trim().is_empty() => Some(s),
        Ok(_) => None,
        Err(e) => {
            log::warn!("[SESSION_STORE] Ignoring unreadable stored session: {}", e);
            None
        }
    }
}

/// JSON file store. Writes go through a temporary file and a rename.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionProvider for FileSessionStore {
    fn get(&self) -> Option<Session> {
        std::fs::read_to_string(&self.path).ok().and_then(|s| decode(&s))
    }

    fn set(&self, session: Session) -> ClientResult<()> {
        let data = encode(&session)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, data).map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| ClientError::Storage(e.to_string()))
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }
}

/// Maps the keyring's answer to a delete. A missing entry counts as cleared.
/// Any other failure means the record may still be there, unless this run
/// already moved to the fallback file because the keyring was unusable.
fn keyring_cleared(result: keyring::Result<()>, on_fallback: bool) -> ClientResult<()> {
    match result {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) if on_fallback => {
            log::debug!("[SESSION_STORE] Keyring still unusable on clear: {}", e);
            Ok(())
        }
        Err(e) => Err(ClientError::Storage(format!("could not remove session from keyring: {}", e))),
    }
}

/// OS keyring store with an opt-in file fallback (`KEYRING_FALLBACK=true`).
pub struct KeyringSessionStore {
    service: String,
    account: String,
    fallback: Option<FileSessionStore>,
    on_fallback: AtomicBool,
}

impl KeyringSessionStore {
    pub fn new(fallback: Option<FileSessionStore>) -> Self {
        Self {
            service: SERVICE.to_string(),
            account: ACCOUNT.to_string(),
            fallback,
            on_fallback: AtomicBool::new(false),
        }
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        let fallback = cfg
            .keyring_fallback
            .then(|| FileSessionStore::new(cfg.session_file.clone()));
        Self::new(fallback)
    }

    fn entry(&self) -> Entry {
        Entry::new(&self.service, &self.account)
    }
}

impl SessionProvider for KeyringSessionStore {
    fn get(&self) -> Option<Session> {
        match self.entry().get_password() {
            Ok(raw) => decode(&raw),
            Err(keyring::Error::NoEntry) => self.fallback.as_ref().and_then(|f| f.get()),
            Err(_e) => {
                let file = self.fallback.as_ref()?;
                self.on_fallback.store(true, Ordering::Relaxed);
                file.get()
            }
        }
    }

    fn set(&self, session: Session) -> ClientResult<()> {
        let data = encode(&session)?;
        match self.entry().set_password(&data) {
            Ok(()) => Ok(()),
            Err(e) => match &self.fallback {
                Some(file) => {
                    self.on_fallback.store(true, Ordering::Relaxed);
                    // never log the token itself
                    log::warn!("[SESSION_STORE] Keyring unavailable, persisting session to {}", file.path().display());
                    file.set(session)
                }
                None => Err(ClientError::Storage(format!(
                    "keyring unavailable and file fallback disabled: {}",
                    e
                ))),
            },
        }
    }

    fn clear(&self) -> ClientResult<()> {
        let deleted = self.entry().delete_password();
        if let Some(file) = &self.fallback {
            file.clear()?;
        }
        keyring_cleared(deleted, self.on_fallback.load(Ordering::Relaxed))
    }
}

/// Process-local store, for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self { inner: Mutex::new(Some(session)) }
    }
}

impl SessionProvider for MemorySessionStore {
    fn get(&self) -> Option<Session> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set(&self, session: Session) -> ClientResult<()> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Some(session);
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
