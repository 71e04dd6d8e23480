use crate::domain::errors::{AuthError, FormErrors};
use crate::interface_adapters::browser::BrowserContext;
use crate::interface_adapters::protocol::{LoginForm, LoginPageQuery, SignupForm};
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::views;
use crate::use_cases::SignupInput;
use crate::use_cases::validation::{validate_login, validate_signup};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Html<String> {
    let error = query
        .error
        .filter(|marker| !marker.is_empty())
        .map(|marker| views::login_error_message(&marker));
    views::login_page(error.as_deref(), None, "")
}

pub async fn signup_page() -> Html<String> {
    views::signup_page(None, None, "")
}

#[tracing::instrument(name = "login_submit", skip_all)]
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    // Form checks never reach the API.
    if let Err(err) = validate_login(&form.email, &form.password) {
        return rejected(&err, |message, fields| {
            views::login_page(message, fields, &form.email)
        });
    }

    let browser = BrowserContext::from_jar(&jar);
    let mut session = browser.session(&state);
    let result = session.login(&form.email, &form.password).await;
    let error = session.state().error.clone();

    let page = match &result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            tracing::info!(error = %err, "login rejected.");
            (
                status_for(err),
                views::login_page(error.as_deref(), None, &form.email),
            )
                .into_response()
        }
    };
    browser.respond(jar, state.cookie_secure, page)
}

#[tracing::instrument(name = "signup_submit", skip_all)]
pub async fn signup_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Response {
    let input = SignupInput {
        email: &form.email,
        confirm_email: &form.confirm_email,
        password: &form.password,
        confirm_password: &form.confirm_password,
    };
    if let Err(err) = validate_signup(&input) {
        return rejected(&err, |message, fields| {
            views::signup_page(message, fields, &form.email)
        });
    }

    let browser = BrowserContext::from_jar(&jar);
    let mut session = browser.session(&state);
    let result = session.signup(&form.email, &form.password).await;
    let error = session.state().error.clone();

    let page = match &result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            tracing::info!(error = %err, "signup rejected.");
            (
                status_for(err),
                views::signup_page(error.as_deref(), None, &form.email),
            )
                .into_response()
        }
    };
    browser.respond(jar, state.cookie_secure, page)
}

// Re-render the form with per-field messages.
fn rejected<F>(err: &AuthError, render: F) -> Response
where
    F: FnOnce(Option<&str>, Option<&FormErrors>) -> Html<String>,
{
    match err {
        AuthError::Validation(fields) => {
            (status_for(err), render(None, Some(fields))).into_response()
        }
        other => {
            let message = other.to_string();
            (status_for(err), render(Some(&message), None)).into_response()
        }
    }
}

fn status_for(err: &AuthError) -> StatusCode {
    match err {
        AuthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
        AuthError::RequestFailed(_) => StatusCode::BAD_REQUEST,
        AuthError::NetworkFailure(_) => StatusCode::BAD_GATEWAY,
    }
}
