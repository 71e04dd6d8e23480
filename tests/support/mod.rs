// Shared bootstrapping for integration tests: a stub of the remote API plus
// one portal instance pointed at it.
use axum::extract::Form;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

pub const PILOT_EMAIL: &str = "pilot@example.com";
pub const PILOT_PASSWORD: &str = "correct-horse";
pub const PILOT_TOKEN: &str = "tok-pilot";
pub const NEWCOMER_TOKEN: &str = "tok-new";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Global base URL of the portal after it publishes its bound address.
static PORTAL_URL: OnceLock<String> = OnceLock::new();
static PORTAL_READY: OnceLock<()> = OnceLock::new();

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct SignupBody {
    email: String,
}

fn stub_api() -> Router {
    Router::new()
        .route(
            "/api/v1/health/health",
            get(|| async { Json(json!({ "status": "ok" })) }),
        )
        .route("/api/v1/login", post(stub_login))
        .route("/api/v1/signup", post(stub_signup))
        .route("/api/v1/users/me", get(stub_me))
        .route("/api/v1/logout", post(stub_logout))
}

async fn stub_login(Form(form): Form<LoginForm>) -> Response {
    if form.username == PILOT_EMAIL && form.password == PILOT_PASSWORD {
        let body = json!({ "access_token": PILOT_TOKEN, "token_type": "bearer" });
        return Json(body).into_response();
    }
    detail(StatusCode::BAD_REQUEST, json!("Incorrect email or password"))
}

async fn stub_signup(Json(body): Json<SignupBody>) -> Response {
    match body.email.as_str() {
        "new@example.com" => Json(json!({ "access_token": NEWCOMER_TOKEN })).into_response(),
        // Registered but the API wants a separate login.
        "quiet@example.com" => Json(json!({ "id": 7, "email": body.email })).into_response(),
        "taken@example.com" => detail(StatusCode::BAD_REQUEST, json!("Email already registered")),
        _ => detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!([{ "loc": ["body", "email"], "msg": "value is not a valid email address" }]),
        ),
    }
}

async fn stub_me(headers: HeaderMap) -> Response {
    match bearer(&headers).as_deref() {
        Some(PILOT_TOKEN) => Json(json!({ "id": 1, "email": PILOT_EMAIL })).into_response(),
        Some(NEWCOMER_TOKEN) => Json(json!({ "id": 2, "email": "new@example.com" })).into_response(),
        _ => detail(StatusCode::UNAUTHORIZED, json!("Could not validate credentials")),
    }
}

async fn stub_logout(headers: HeaderMap) -> Response {
    match bearer(&headers).as_deref() {
        Some(PILOT_TOKEN) => StatusCode::NO_CONTENT.into_response(),
        _ => detail(StatusCode::INTERNAL_SERVER_ERROR, json!("logout exploded")),
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn detail(status: StatusCode, detail: Value) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

// Ensure the stub API and the portal are running; returns the portal base URL.
pub fn ensure_portal() -> &'static str {
    PORTAL_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Own runtime so both servers outlive individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let api_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind stub api port");
                let api_addr = api_listener.local_addr().expect("get stub api addr");
                tokio::spawn(async move {
                    axum::serve(api_listener, stub_api())
                        .await
                        .expect("stub api failed");
                });

                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let config = portal::PortalConfig {
                    api_base_url: format!("http://{api_addr}/api/v1"),
                    api_timeout_ms: 2000,
                    ..portal::PortalConfig::default()
                };
                let _ = published_url_thread.set(format!("http://{addr}"));
                portal::run(listener, config).await.expect("portal failed");
            });
        });
        wait_for_portal(published_url);
    });

    PORTAL_URL
        .get()
        .expect("portal url should be initialized")
        .as_str()
}

// Browser stand-in that leaves redirects for the test to inspect.
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("test client")
}

pub fn form_body(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

pub fn location(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub fn set_cookie(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
}

fn wait_for_portal(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = PORTAL_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // The portal probes the API before it accepts connections.
    for _ in 0..200 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("portal did not become ready in time");
}
