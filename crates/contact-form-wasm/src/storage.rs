//! `localStorage` as the name store.

use contact_form::{FormError, NameStore, Result};
use web_sys::{Storage, Window};

pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    /// Storage may be absent (private browsing, disabled by policy)
    pub fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| FormError::Storage("localStorage unavailable".to_string()))
    }
}

impl NameStore for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| FormError::Storage(format!("{:?}", e)))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| FormError::Storage(format!("{:?}", e)))
    }
}
