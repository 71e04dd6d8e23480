use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::{SignupGrant, TokenGrant, User};
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthApi, Navigator, TokenStore};

// Scripted responses for each API operation.
struct Script {
    login: Result<TokenGrant, AuthError>,
    signup: Result<SignupGrant, AuthError>,
    current_user: Result<User, AuthError>,
    logout: Result<(), AuthError>,
}

// Fake API that replays scripted results and records every call.
#[derive(Clone)]
pub(crate) struct FakeApi {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                login: Ok(TokenGrant {
                    access_token: "token".to_string(),
                }),
                signup: Ok(SignupGrant::default()),
                current_user: Ok(User {
                    id: "1".to_string(),
                    email: "test@example.com".to_string(),
                }),
                logout: Ok(()),
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn with_login(self, result: Result<TokenGrant, AuthError>) -> Self {
        self.set_login(result);
        self
    }

    pub(crate) fn with_signup(self, result: Result<SignupGrant, AuthError>) -> Self {
        self.script().signup = result;
        self
    }

    pub(crate) fn with_current_user(self, result: Result<User, AuthError>) -> Self {
        self.script().current_user = result;
        self
    }

    pub(crate) fn with_logout(self, result: Result<(), AuthError>) -> Self {
        self.script().logout = result;
        self
    }

    pub(crate) fn set_login(&self, result: Result<TokenGrant, AuthError>) {
        self.script().login = result;
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("script mutex poisoned")
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, email: &str, _password: &str) -> Result<TokenGrant, AuthError> {
        self.record(format!("login:{email}"));
        self.script().login.clone()
    }

    async fn signup(&self, email: &str, _password: &str) -> Result<SignupGrant, AuthError> {
        self.record(format!("signup:{email}"));
        self.script().signup.clone()
    }

    async fn current_user(&self) -> Result<User, AuthError> {
        self.record("current_user".to_string());
        self.script().current_user.clone()
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.record("logout".to_string());
        self.script().logout.clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingTokens {
    token: Mutex<Option<String>>,
}

impl RecordingTokens {
    pub(crate) fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for RecordingTokens {
    fn get(&self) -> Option<String> {
        self.token.lock().expect("token mutex poisoned").clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().expect("token mutex poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().expect("token mutex poisoned") = None;
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn last(&self) -> Option<String> {
        self.visits
            .lock()
            .expect("visits mutex poisoned")
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) {
        self.visits
            .lock()
            .expect("visits mutex poisoned")
            .push(target.to_string());
    }
}
