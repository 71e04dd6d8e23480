use std::sync::Arc;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::domain::ports::{Navigator, TokenStore};
use crate::interface_adapters::clients::ApiClient;
use crate::interface_adapters::navigation::RedirectNavigator;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::token_store::MemoryTokenStore;
use crate::use_cases::SessionController;

// Cookie holding the bearer token; the name is shared with the route guard.
pub const TOKEN_COOKIE: &str = "auth_token";

// One request's view of the browser: the token it carried in and where it
// should be sent next.
pub struct BrowserContext {
    initial: Option<String>,
    tokens: Arc<MemoryTokenStore>,
    navigator: Arc<RedirectNavigator>,
}

impl BrowserContext {
    pub fn from_jar(jar: &CookieJar) -> Self {
        let initial = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty());
        Self {
            tokens: Arc::new(MemoryTokenStore::seeded(initial.clone())),
            navigator: Arc::new(RedirectNavigator::default()),
            initial,
        }
    }

    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        self.tokens.clone()
    }

    pub fn navigator(&self) -> Arc<dyn Navigator> {
        self.navigator.clone()
    }

    pub fn api_client(&self, state: &AppState) -> ApiClient {
        ApiClient::new(
            state.http.clone(),
            state.api_base_url.clone(),
            self.tokens(),
            self.navigator(),
        )
    }

    pub fn session(&self, state: &AppState) -> SessionController<ApiClient> {
        SessionController::new(self.api_client(state), self.tokens(), self.navigator())
    }

    // Persist token changes back into the cookie jar.
    pub fn sync_cookies(&self, jar: CookieJar, secure: bool) -> CookieJar {
        let current = self.tokens.get();
        if current == self.initial {
            return jar;
        }

        match current {
            Some(token) => jar.add(token_cookie(token, secure)),
            None => jar.add(expired_token_cookie(secure)),
        }
    }

    // Redirect if anything navigated during the request, otherwise render `page`.
    pub fn respond(self, jar: CookieJar, secure: bool, page: impl IntoResponse) -> Response {
        let jar = self.sync_cookies(jar, secure);
        match self.navigator.target() {
            Some(target) => (jar, Redirect::to(&target)).into_response(),
            None => (jar, page).into_response(),
        }
    }
}

fn token_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn expired_token_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .build()
}
