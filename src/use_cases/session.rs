use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{EntryPoint, User};
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthApi, Navigator, TokenStore};

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Signup failed";

// Snapshot of what the UI renders from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub loading: bool,
    pub user: Option<User>,
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        // Nothing is known until initialize() has run.
        Self {
            loading: true,
            user: None,
            error: None,
        }
    }
}

// Owns the in-memory identity for one browsing context and orchestrates the
// token store, API and navigation. Operations take `&mut self`: one logical
// caller per session.
pub struct SessionController<A> {
    api: A,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    state: SessionState,
}

impl<A> SessionController<A>
where
    A: AuthApi,
{
    pub fn new(api: A, tokens: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            tokens,
            navigator,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    // Resolve the stored token to a user, dropping the token if it is rejected.
    #[tracing::instrument(name = "session_initialize", skip_all)]
    pub async fn initialize(&mut self) {
        if self.tokens.has() {
            match self.api.current_user().await {
                Ok(user) => {
                    debug!(user_id = %user.id, "session restored.");
                    self.state.user = Some(user);
                }
                Err(err) => {
                    debug!(error = %err, "stored token rejected; clearing session.");
                    self.tokens.clear();
                    self.state.user = None;
                }
            }
        }

        self.state.loading = false;
    }

    #[tracing::instrument(name = "session_login", skip_all)]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        self.state.error = None;
        self.state.loading = true;

        let result = match self.api.login(email, password).await {
            Ok(grant) => self.establish(&grant.access_token).await,
            Err(err) => Err(err),
        };

        self.finish(result, LOGIN_FAILED)
    }

    #[tracing::instrument(name = "session_signup", skip_all)]
    pub async fn signup(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        self.state.error = None;
        self.state.loading = true;

        let result = match self.api.signup(email, password).await {
            Ok(grant) => match grant.access_token.filter(|token| !token.is_empty()) {
                Some(token) => self.establish(&token).await,
                None => {
                    // Account exists but must be verified before signing in.
                    info!("signup accepted without token; verification required.");
                    self.navigator.navigate_to(EntryPoint::Login);
                    Ok(())
                }
            },
            Err(err) => Err(err),
        };

        self.finish(result, SIGNUP_FAILED)
    }

    // Always succeeds locally, whatever the server says.
    #[tracing::instrument(name = "session_logout", skip_all)]
    pub async fn logout(&mut self) {
        self.state.loading = true;

        if let Err(err) = self.api.logout().await {
            warn!(error = %err, "logout request failed.");
        }

        self.tokens.clear();
        self.state.user = None;
        self.state.loading = false;
        self.navigator.navigate_to(EntryPoint::Login);
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    // Persist the token and validate it; token and user are kept or dropped together.
    async fn establish(&mut self, token: &str) -> Result<(), AuthError> {
        self.tokens.set(token);

        match self.api.current_user().await {
            Ok(user) => {
                info!(user_id = %user.id, "session established.");
                self.state.user = Some(user);
                self.navigator.navigate_to(EntryPoint::Dashboard);
                Ok(())
            }
            Err(err) => {
                self.tokens.clear();
                self.state.user = None;
                Err(err)
            }
        }
    }

    fn finish(&mut self, result: Result<(), AuthError>, fallback: &str) -> Result<(), AuthError> {
        if let Err(err) = &result {
            let message = err.to_string();
            self.state.error = Some(if message.is_empty() {
                fallback.to_string()
            } else {
                message
            });
        }

        self.state.loading = false;
        result
    }
}
