pub mod oauth_callback;
pub mod route_guard;
pub mod session;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use oauth_callback::{CallbackOutcome, CallbackParams, OAuthCallbackUseCase};
pub use route_guard::GuardDecision;
pub use session::{SessionController, SessionState};
pub use validation::SignupInput;
