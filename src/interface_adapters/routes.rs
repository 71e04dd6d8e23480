use crate::interface_adapters::handlers::dashboard::{dashboard, home, logout};
use crate::interface_adapters::handlers::entry::{
    login_page, login_submit, signup_page, signup_submit,
};
use crate::interface_adapters::handlers::oauth::{provider_callback, provider_login};
use crate::interface_adapters::middleware::route_guard;
use crate::interface_adapters::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the browser-facing routes; the guard runs ahead of every handler.
    Router::new()
        .route("/", get(home))
        .route("/login", get(login_page).post(login_submit))
        .route("/signup", get(signup_page).post(signup_submit))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/{*rest}", get(dashboard))
        .route("/logout", post(logout))
        .route("/auth/{provider}/login", get(provider_login))
        .route("/auth/callback/{provider}", get(provider_callback))
        .layer(middleware::from_fn(route_guard))
        .with_state(state)
}
