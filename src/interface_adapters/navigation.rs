use std::sync::Mutex;

use crate::domain::ports::Navigator;

// Remembers where the browsing context was last sent; the handler turns the
// final target into a redirect.
#[derive(Debug, Default)]
pub struct RedirectNavigator {
    target: Mutex<Option<String>>,
}

impl RedirectNavigator {
    pub fn target(&self) -> Option<String> {
        self.target
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Navigator for RedirectNavigator {
    fn navigate(&self, target: &str) {
        tracing::debug!(%target, "navigate");
        let mut guard = self.target.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(target.to_string());
    }
}
