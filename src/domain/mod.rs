pub mod entities;
pub mod errors;
pub mod ports;

// Re-export the domain boundary types and ports.
pub use entities::{EntryPoint, Provider, SignupGrant, TokenGrant, User};
pub use errors::{AuthError, FieldError, FormErrors};
pub use ports::{AuthApi, Navigator, TokenStore};
