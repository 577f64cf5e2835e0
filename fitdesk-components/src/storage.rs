//! Keeping the session in the browser's `localStorage`

use fitdesk_shared::session::SessionStore;
use send_wrapper::SendWrapper;
use tracing::warn;
use web_sys::Storage;

/// [`SessionStore`] backed by `window.localStorage`
///
/// Without a storage (private mode, or outside of a browser) nothing is remembered.
#[derive(Debug, Clone, Default)]
pub struct LocalSessionStore {
    storage: Option<SendWrapper<Storage>>,
}
impl LocalSessionStore {
    #[cfg(feature = "hydrate")]
    pub fn open() -> Self {
        let storage = leptos::prelude::window()
            .local_storage()
            .ok()
            .flatten()
            .map(SendWrapper::new);
        if storage.is_none() {
            warn!("localStorage is not available, the session will not survive a reload.");
        }
        Self { storage }
    }

    #[cfg(not(feature = "hydrate"))]
    pub fn open() -> Self {
        Self::default()
    }
}
impl SessionStore for LocalSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                warn!("Unable to store {key}: {e:?}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}
