use crate::domain::entities::Provider;
use crate::interface_adapters::browser::BrowserContext;
use crate::interface_adapters::clients::join_url;
use crate::interface_adapters::protocol::CallbackQuery;
use crate::interface_adapters::state::AppState;
use crate::use_cases::OAuthCallbackUseCase;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

// Hands the browser to the API, which runs the provider's redirect chain.
#[tracing::instrument(name = "provider_login", skip_all, fields(provider = %provider))]
pub async fn provider_login(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
) -> Response {
    let Ok(provider) = provider.parse::<Provider>() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let target = join_url(
        &state.api_base_url,
        &format!("/auth/{}/login", provider.slug()),
    );
    Redirect::to(&target).into_response()
}

#[tracing::instrument(name = "provider_callback", skip_all, fields(provider = %provider))]
pub async fn provider_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(provider): Path<String>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let Ok(provider) = provider.parse::<Provider>() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let browser = BrowserContext::from_jar(&jar);
    let use_case = OAuthCallbackUseCase {
        tokens: browser.tokens(),
        navigator: browser.navigator(),
    };
    use_case.execute(provider, query.into());

    browser.respond(jar, state.cookie_secure, StatusCode::NO_CONTENT)
}
