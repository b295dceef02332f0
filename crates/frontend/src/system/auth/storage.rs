use web_sys::window;

use crate::shared::api::SessionStore;

/// Bearer token persisted in `window.localStorage`.
///
/// Storage errors (private mode, quota, no window) read as "no token".
pub struct LocalStorageSession {
    key: String,
}

impl LocalStorageSession {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl SessionStore for LocalStorageSession {
    fn token(&self) -> Option<String> {
        get_local_storage()?.get_item(&self.key).ok()?
    }

    fn set_token(&self, token: &str) {
        if let Some(storage) = get_local_storage() {
            if storage.set_item(&self.key, token).is_err() {
                log::warn!("Could not persist session token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
