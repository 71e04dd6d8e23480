// Framework bootstrap for the portal runtime.

use crate::frameworks::config::PortalConfig;
use crate::interface_adapters::clients::{ApiClient, build_http_client};
use crate::interface_adapters::navigation::RedirectNavigator;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::token_store::DetachedTokenStore;

use std::io::Result;
use std::sync::Arc;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, config: PortalConfig) -> Result<()> {
    let address = listener.local_addr()?;
    // build state
    let state = build_state(&config)?;

    probe_api(&state, &config.api_health_path).await;

    let app = app(state);

    tracing::info!(%address, api_base_url = %config.api_base_url, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config = PortalConfig::load().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::io::Error::other(e)
    })?;
    let address = config.listen_addr().await.map_err(|e| {
        tracing::error!(error = %e, "invalid listen address");
        std::io::Error::other(e)
    })?;

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}

fn build_state(config: &PortalConfig) -> Result<Arc<AppState>> {
    let http = build_http_client(config.api_timeout())
        .map_err(|e| std::io::Error::other(format!("failed to initialize api client: {e}")))?;
    tracing::debug!(
        api_base_url = %config.api_base_url,
        api_timeout_ms = config.api_timeout_ms,
        cookie_secure = config.cookie_secure,
        "api client configured"
    );

    Ok(Arc::new(AppState {
        http,
        api_base_url: config.api_base_url.clone(),
        cookie_secure: config.cookie_secure,
    }))
}

// Best effort: the portal still starts when the API is down.
async fn probe_api(state: &AppState, health_path: &str) {
    let client = ApiClient::new(
        state.http.clone(),
        state.api_base_url.clone(),
        Arc::new(DetachedTokenStore),
        Arc::new(RedirectNavigator::default()),
    );

    match client.health(health_path).await {
        Ok(body) => tracing::info!(base_url = client.base_url(), %body, "api reachable"),
        Err(e) => {
            tracing::warn!(base_url = client.base_url(), error = %e, "api health check failed")
        }
    }
}
