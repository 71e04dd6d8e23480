use serde::Deserialize;
use serde_json::Value;

use crate::use_cases::CallbackParams;

// Login form posted by the browser.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// Signup form posted by the browser.
#[derive(Debug, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub confirm_email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

// Query string on `GET /login`; carries provider failure markers.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
    pub error: Option<String>,
}

// Query string a provider redirect lands with.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub access_token: Option<String>,
    pub error: Option<String>,
}

impl From<CallbackQuery> for CallbackParams {
    fn from(query: CallbackQuery) -> Self {
        CallbackParams {
            access_token: query.access_token,
            error: query.error,
        }
    }
}

// Error envelope returned by the API. `detail` is either a string or a list
// of validation entries carrying `msg`.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl ApiErrorBody {
    pub fn readable_message(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(readable)
            .or_else(|| self.message.as_ref().and_then(readable))
    }
}

fn readable(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
