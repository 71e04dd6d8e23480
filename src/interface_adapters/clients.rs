use crate::domain::entities::{EntryPoint, SignupGrant, TokenGrant, User};
use crate::domain::errors::{AuthError, GENERIC_FAILURE_MESSAGE};
use crate::domain::ports::{AuthApi, Navigator, TokenStore};
use crate::interface_adapters::protocol::ApiErrorBody;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Duration;
use url::form_urlencoded;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const NETWORK_FAILURE_MESSAGE: &str = "Unable to reach the server";
const DECODE_FAILURE_MESSAGE: &str = "Unexpected response from the server";

// Shared connection pool for every browsing context.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

// Exactly one slash between base and endpoint.
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

pub enum RequestBody {
    Json(Value),
    Form(Vec<(String, String)>),
}

// Method, extra headers and body for one API call.
#[derive(Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn with_form(mut self, fields: &[(&str, &str)]) -> Self {
        let fields = fields
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        self.body = Some(RequestBody::Form(fields));
        self
    }
}

// Thin wrapper around reqwest for calls to the remote API. Bound to one
// browsing context: it reads the token from, and clears it in, that
// context's store.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            tokens,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }

    #[tracing::instrument(
        name = "api_request",
        skip_all,
        fields(method = %options.method, endpoint = %endpoint)
    )]
    pub async fn request<T>(&self, endpoint: &str, options: RequestOptions) -> Result<T, AuthError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint);
        let headers = self.build_headers(options.headers);

        let mut builder = self.http.request(options.method, url).headers(headers);
        match options.body {
            Some(RequestBody::Json(value)) => builder = builder.body(value.to_string()),
            Some(RequestBody::Form(fields)) => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields)
                    .finish();
                builder = builder.body(encoded);
            }
            None => {}
        }

        let response = builder.send().await.map_err(|err| {
            tracing::warn!(error = %err, "api request failed in transport.");
            AuthError::NetworkFailure(NETWORK_FAILURE_MESSAGE.to_string())
        })?;
        let status = response.status();

        // Clear the session before the error reaches any caller.
        if status == StatusCode::UNAUTHORIZED {
            self.tokens.clear();
            self.navigator.navigate_to(EntryPoint::Login);
            tracing::info!("api rejected credentials; session cleared.");
            return Err(AuthError::Unauthorized);
        }

        // Keep upstream messages so forms can show them verbatim.
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ApiErrorBody>(&body)
                .ok()
                .and_then(|payload| payload.readable_message())
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            tracing::debug!(%status, %message, "api request rejected.");
            return Err(AuthError::RequestFailed(message));
        }

        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(Value::Object(Map::new())).map_err(|err| {
                tracing::warn!(error = %err, "empty response does not fit the expected type.");
                AuthError::RequestFailed(DECODE_FAILURE_MESSAGE.to_string())
            });
        }

        response.json::<T>().await.map_err(|err| {
            tracing::warn!(error = %err, "api response decode failed.");
            if err.is_decode() {
                AuthError::RequestFailed(DECODE_FAILURE_MESSAGE.to_string())
            } else {
                AuthError::NetworkFailure(NETWORK_FAILURE_MESSAGE.to_string())
            }
        })
    }

    // Probe used at startup; no session involved.
    pub async fn health(&self, path: &str) -> Result<Value, AuthError> {
        self.request(path, RequestOptions::get()).await
    }

    fn build_headers(&self, extra: HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(extra);

        if let Some(token) = self.tokens.get() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::warn!("stored token is not a valid header value; sent without it.")
                }
            }
        }

        headers
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<TokenGrant, AuthError> {
        // The API expects an OAuth2 password form: the email travels as `username`.
        let options = RequestOptions::post()
            .with_header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
            .with_form(&[("username", email), ("password", password)]);
        self.request("/login", options).await
    }

    async fn signup(&self, email: &str, password: &str) -> Result<SignupGrant, AuthError> {
        let options =
            RequestOptions::post().with_json(json!({ "email": email, "password": password }));
        self.request("/signup", options).await
    }

    async fn current_user(&self) -> Result<User, AuthError> {
        self.request("/users/me", RequestOptions::get()).await
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.request::<Value>("/logout", RequestOptions::post())
            .await
            .map(|_| ())
    }
}
