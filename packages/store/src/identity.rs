//! Identity provider capability.

use crate::models::User;

/// Result of starting a sign-in.
#[derive(Clone, Debug, PartialEq)]
pub enum SignInOutcome {
    /// The provider completed sign-in in place.
    SignedIn(User),
    /// The browser must navigate to the provider to continue; the identity
    /// becomes visible through `current_user` once it returns.
    Redirect { url: String },
}

/// Async interface over a hosted sign-in service.
///
/// Errors are plain messages; the dispatcher turns them into
/// [`crate::ThoughtError::SignIn`] / [`crate::ThoughtError::SignOut`].
pub trait IdentityProvider {
    fn sign_in(&self) -> impl std::future::Future<Output = Result<SignInOutcome, String>>;

    fn sign_out(&self) -> impl std::future::Future<Output = Result<(), String>>;

    /// The identity the provider currently holds, if any.
    fn current_user(&self) -> impl std::future::Future<Output = Result<Option<User>, String>>;
}
