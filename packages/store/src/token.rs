//! # Persisted credential store
//!
//! The client keeps exactly one opaque auth token between sessions, under the
//! fixed key [`TOKEN_KEY`]. [`TokenStore`] abstracts where it lives:
//!
//! | Implementation | Platform | Backing |
//! |----------------|----------|---------|
//! | [`MemoryTokenStore`] | any | process memory (tests, ephemeral sessions) |
//! | [`FileTokenStore`] | native | `<data_dir>/waypoint/token` |
//! | [`LocalStorageTokenStore`] | WASM + `web` feature | `window.localStorage["token"]` |
//!
//! Storage failures are swallowed: an unreadable store behaves like an empty one,
//! which simply means the user has to log in again.

use std::sync::{Arc, Mutex};

/// Fixed storage key for the auth token.
pub const TOKEN_KEY: &str = "token";

/// Read/write/clear access to the persisted auth token.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// In-memory token store for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

/// Filesystem-backed token store for desktop builds.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileTokenStore {
    /// Store the token in `<base>/token`.
    pub fn new(base: std::path::PathBuf) -> Self {
        Self {
            path: base.join(TOKEN_KEY),
        }
    }

    /// The platform data directory, falling back to the working directory.
    pub fn default_location() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("waypoint");
        Self::new(base)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let token = content.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = std::fs::write(&self.path, token);
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Browser `localStorage` token store.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
#[derive(Clone, Debug, Default)]
pub struct LocalStorageTokenStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl LocalStorageTokenStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok()?
    }

    fn save(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert!(store.load().is_none());
        store.save("abc");
        assert_eq!(store.load().as_deref(), Some("abc"));

        // Clones share the same slot.
        let other = store.clone();
        other.clear();
        assert!(store.load().is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("waypoint_token_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileTokenStore::new(dir.clone());
        assert!(store.load().is_none());
        store.save("secret-token");

        let reopened = FileTokenStore::new(dir.clone());
        assert_eq!(reopened.load().as_deref(), Some("secret-token"));

        reopened.clear();
        assert!(store.load().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
