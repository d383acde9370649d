use thiserror::Error;

/// `localStorage` key holding the bearer token.
pub const CREDENTIAL_SLOT: &str = "jwt";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("browser storage unavailable")]
    StorageUnavailable,
    #[error("credential storage error: {0}")]
    Io(String),
}

/// Where the bearer token survives page reloads.
pub trait CredentialStore {
    /// The stored token; blank values count as absent.
    fn get(&self) -> Result<Option<String>, SessionError>;
    fn set(&mut self, token: &str) -> Result<(), SessionError>;
    fn clear(&mut self) -> Result<(), SessionError>;

    fn has_credential(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }
}

fn non_blank(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryCredentialStore {
    token: Option<String>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        Ok(non_blank(self.token.clone()))
    }

    fn set(&mut self, token: &str) -> Result<(), SessionError> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.token = None;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{CredentialStore, SessionError, non_blank};

    #[derive(Debug)]
    pub struct LocalStorageCredentialStore {
        key: String,
    }

    impl LocalStorageCredentialStore {
        pub fn new(key: impl Into<String>) -> Result<Self, SessionError> {
            // Fail early when storage is blocked so callers can fall back.
            window_local_storage()?;
            Ok(Self { key: key.into() })
        }
    }

    impl CredentialStore for LocalStorageCredentialStore {
        fn get(&self) -> Result<Option<String>, SessionError> {
            let raw = window_local_storage()?
                .get_item(&self.key)
                .map_err(|e| SessionError::Io(format!("get_item failed: {:?}", e)))?;
            Ok(non_blank(raw))
        }

        fn set(&mut self, token: &str) -> Result<(), SessionError> {
            window_local_storage()?
                .set_item(&self.key, token)
                .map_err(|e| SessionError::Io(format!("set_item failed: {:?}", e)))
        }

        fn clear(&mut self) -> Result<(), SessionError> {
            window_local_storage()?
                .remove_item(&self.key)
                .map_err(|e| SessionError::Io(format!("remove_item failed: {:?}", e)))
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, SessionError> {
        let win = web_sys::window().ok_or(SessionError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| SessionError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(SessionError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStorageCredentialStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStorageCredentialStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorageCredentialStore {
    pub fn new(_key: impl Into<String>) -> Result<Self, SessionError> {
        Err(SessionError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl CredentialStore for LocalStorageCredentialStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        Err(SessionError::StorageUnavailable)
    }

    fn set(&mut self, _token: &str) -> Result<(), SessionError> {
        Err(SessionError::StorageUnavailable)
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        Err(SessionError::StorageUnavailable)
    }
}

/// Browser storage when available, memory otherwise (private mode, tests).
#[derive(Debug)]
pub enum BrowserCredentialStore {
    Local(LocalStorageCredentialStore),
    Memory(InMemoryCredentialStore),
}

impl BrowserCredentialStore {
    pub fn new() -> Self {
        match LocalStorageCredentialStore::new(CREDENTIAL_SLOT) {
            Ok(s) => BrowserCredentialStore::Local(s),
            Err(err) => {
                tracing::warn!(%err, "falling back to in-memory credential store");
                BrowserCredentialStore::Memory(InMemoryCredentialStore::new())
            }
        }
    }
}

impl Default for BrowserCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for BrowserCredentialStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        match self {
            BrowserCredentialStore::Local(s) => s.get(),
            BrowserCredentialStore::Memory(s) => s.get(),
        }
    }

    fn set(&mut self, token: &str) -> Result<(), SessionError> {
        match self {
            BrowserCredentialStore::Local(s) => s.set(token),
            BrowserCredentialStore::Memory(s) => s.set(token),
        }
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        match self {
            BrowserCredentialStore::Local(s) => s.clear(),
            BrowserCredentialStore::Memory(s) => s.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn in_memory_set_get_clear() {
        let mut store = InMemoryCredentialStore::new();
        assert_eq!(store.get(), Ok(None));
        assert!(!store.has_credential());

        store.set("abc").expect("set");
        assert_eq!(store.get(), Ok(Some("abc".to_string())));
        assert!(store.has_credential());

        store.clear().expect("clear");
        assert_eq!(store.get(), Ok(None));
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let store = InMemoryCredentialStore::with_token("   ");
        assert_eq!(store.get(), Ok(None));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn browser_store_falls_back_to_memory_on_host() {
        let mut store = BrowserCredentialStore::new();
        assert!(matches!(store, BrowserCredentialStore::Memory(_)));
        store.set("t").expect("set");
        assert!(store.has_credential());
    }
}
