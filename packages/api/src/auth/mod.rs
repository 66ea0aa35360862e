//! Sign-in through OAuth providers.

mod provider;
pub use provider::OAuthProvider;

#[cfg(feature = "server")]
mod config;
#[cfg(feature = "server")]
mod oauth;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use config::OAuthConfig;
#[cfg(feature = "server")]
pub use oauth::OAuthFlow;
#[cfg(feature = "server")]
pub use session::SESSION_USER_ID_KEY;
