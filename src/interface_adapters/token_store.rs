use std::sync::Mutex;

use crate::domain::ports::TokenStore;

// Token held for one browsing context. In the server it is seeded from the
// session cookie and written back when the request completes.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn seeded(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token.filter(|token| !token.is_empty())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, token: &str) {
        let mut guard = self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(token.to_string());
    }

    fn clear(&self) {
        let mut guard = self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
    }
}

// Stand-in where no browsing context exists: writes are skipped, reads are empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedTokenStore;

impl TokenStore for DetachedTokenStore {
    fn get(&self) -> Option<String> {
        None
    }

    fn set(&self, _token: &str) {
        tracing::trace!("no browsing context; token not persisted.");
    }

    fn clear(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_token_is_set_then_get_and_has_reflect_it() {
        let store = MemoryTokenStore::default();

        store.set("abc");

        assert_eq!(store.get(), Some("abc".to_string()));
        assert!(store.has());
    }

    #[test]
    fn when_token_is_cleared_then_get_returns_none() {
        let store = MemoryTokenStore::seeded(Some("abc".to_string()));

        store.clear();

        assert_eq!(store.get(), None);
        assert!(!store.has());
    }

    #[test]
    fn when_set_is_called_twice_then_last_writer_wins() {
        let store = MemoryTokenStore::default();

        store.set("first");
        store.set("second");

        assert_eq!(store.get(), Some("second".to_string()));
    }

    #[test]
    fn when_seeded_with_empty_cookie_then_store_is_empty() {
        let store = MemoryTokenStore::seeded(Some(String::new()));
        assert!(!store.has());
    }

    #[test]
    fn when_detached_then_writes_are_ignored() {
        let store = DetachedTokenStore;

        store.set("abc");
        assert_eq!(store.get(), None);
        store.clear();
        assert!(!store.has());
    }
}
