//! Error types shared by the adapter, the dispatcher and the server functions.

use thiserror::Error;

/// Failure reported by a [`crate::DocumentStore`] backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The backend could not be reached or rejected the request.
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    /// The backend answered with something that is not a valid record.
    #[error("malformed record: {0}")]
    Malformed(String),
    /// The backend refused the operation for the acting user.
    #[error("permission denied: {0}")]
    Denied(String),
}

/// Errors surfaced by the note operations.
///
/// Each variant maps to one user-visible notice; see [`crate::notice::Notice`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ThoughtError {
    #[error("failed to fetch thoughts: {0}")]
    Fetch(#[source] StoreError),
    #[error("failed to add thought: {0}")]
    Create(#[source] StoreError),
    #[error("failed to delete thought: {0}")]
    Delete(#[source] StoreError),
    #[error("failed to sign in: {0}")]
    SignIn(String),
    #[error("failed to sign out: {0}")]
    SignOut(String),
    #[error("you must be signed in to add a thought")]
    NotAuthenticated,
    /// Delete attempted on a note owned by another user.
    #[error("thought {0} belongs to another user")]
    Forbidden(String),
}
