use std::sync::Arc;

use url::form_urlencoded;

use crate::domain::entities::{EntryPoint, Provider};
use crate::domain::ports::{Navigator, TokenStore};

// Query parameters a provider redirect may carry.
#[derive(Clone, Debug, Default)]
pub struct CallbackParams {
    pub access_token: Option<String>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    SignedIn,
    ProviderError(String),
    // Neither a token nor an error came back.
    Missing,
}

// Callback landing use case; one instance serves every provider.
pub struct OAuthCallbackUseCase {
    pub tokens: Arc<dyn TokenStore>,
    pub navigator: Arc<dyn Navigator>,
}

impl OAuthCallbackUseCase {
    #[tracing::instrument(name = "oauth_callback", skip_all, fields(provider = %provider))]
    pub fn execute(&self, provider: Provider, params: CallbackParams) -> CallbackOutcome {
        let access_token = params.access_token.filter(|token| !token.is_empty());
        let error = params.error.filter(|error| !error.is_empty());

        if let Some(token) = access_token {
            self.tokens.set(&token);
            self.navigator.navigate_to(EntryPoint::Dashboard);
            tracing::info!("provider sign-in completed.");
            return CallbackOutcome::SignedIn;
        }

        if let Some(error) = error {
            tracing::warn!(%error, "provider reported an error.");
            self.navigator.navigate(&login_with_error(provider));
            return CallbackOutcome::ProviderError(error);
        }

        tracing::warn!("provider callback carried neither token nor error.");
        self.navigator.navigate_to(EntryPoint::Login);
        CallbackOutcome::Missing
    }
}

pub fn login_with_error(provider: Provider) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("error", &provider.error_marker())
        .finish();
    format!("{}?{query}", EntryPoint::Login.path())
}
