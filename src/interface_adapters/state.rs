use reqwest::Client;

#[derive(Clone)]
pub struct AppState {
    // Pooled HTTP client shared by every browsing context.
    pub http: Client,
    // Remote API root, e.g. `http://localhost:8000/api/v1`.
    pub api_base_url: String,
    // Mark the session cookie `Secure` (HTTPS deployments).
    pub cookie_secure: bool,
}
