use async_trait::async_trait;

use crate::domain::entities::{EntryPoint, SignupGrant, TokenGrant, User};
use crate::domain::errors::AuthError;

// Single persisted bearer token for one browsing context.
// Implementations must never panic, even without a backing context.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);

    fn has(&self) -> bool {
        self.get().is_some()
    }
}

// Moves the browsing context to another entry point.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);

    fn navigate_to(&self, entry: EntryPoint) {
        self.navigate(entry.path());
    }
}

// The session controller depends on this trait, not the concrete HTTP client.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<TokenGrant, AuthError>;
    async fn signup(&self, email: &str, password: &str) -> Result<SignupGrant, AuthError>;
    async fn current_user(&self) -> Result<User, AuthError>;
    async fn logout(&self) -> Result<(), AuthError>;
}
