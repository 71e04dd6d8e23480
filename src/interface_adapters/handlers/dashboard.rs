use crate::domain::entities::EntryPoint;
use crate::interface_adapters::browser::BrowserContext;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

pub async fn home() -> Redirect {
    Redirect::to(EntryPoint::Dashboard.path())
}

// Serves `/dashboard` and everything below it.
#[tracing::instrument(name = "dashboard", skip_all)]
pub async fn dashboard(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let browser = BrowserContext::from_jar(&jar);
    let mut session = browser.session(&state);
    session.initialize().await;

    let page = match session.user() {
        Some(user) => views::dashboard_page(user).into_response(),
        None => {
            // The guard only saw a cookie; the API did not accept it.
            browser.navigator().navigate_to(EntryPoint::Login);
            StatusCode::NO_CONTENT.into_response()
        }
    };
    browser.respond(jar, state.cookie_secure, page)
}

#[tracing::instrument(name = "logout", skip_all)]
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let browser = BrowserContext::from_jar(&jar);
    let mut session = browser.session(&state);
    session.logout().await;
    browser.respond(jar, state.cookie_secure, StatusCode::NO_CONTENT)
}
