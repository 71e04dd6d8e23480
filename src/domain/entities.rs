use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// Identity resolved from the current token by the whoami call.
// Never persisted; always re-derived from the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
}

// Token issued by a successful login.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
}

// Signup may withhold the token when the account still needs verification.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SignupGrant {
    #[serde(default)]
    pub access_token: Option<String>,
}

// The API serializes numeric ids; the portal treats every id as opaque text.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(value) => value,
        RawId::Int(value) => value.to_string(),
        RawId::Unsigned(value) => value.to_string(),
    })
}

// Named portal routes used as navigation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryPoint {
    Login,
    Signup,
    Dashboard,
}

impl EntryPoint {
    pub fn path(self) -> &'static str {
        match self {
            EntryPoint::Login => "/login",
            EntryPoint::Signup => "/signup",
            EntryPoint::Dashboard => "/dashboard",
        }
    }
}

// External identity providers that can redirect back with a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Google,
    Microsoft,
    Github,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Google, Provider::Microsoft, Provider::Github];

    // Path segment used by both the API login route and the callback route.
    pub fn slug(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Microsoft => "microsoft",
            Provider::Github => "github",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Microsoft => "Microsoft",
            Provider::Github => "GitHub",
        }
    }

    // Marker appended to the login route when the provider reports an error.
    pub fn error_marker(self) -> String {
        format!("{}AuthFailed", self.label())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown identity provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|provider| provider.slug() == value)
            .ok_or_else(|| UnknownProvider(value.to_string()))
    }
}
