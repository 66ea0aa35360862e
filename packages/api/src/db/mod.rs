//! # Database module: PostgreSQL pool, migrations and the document table
//!
//! Entirely gated behind `#[cfg(feature = "server")]` so that client (WASM) builds
//! never pull in SQLx.
//!
//! - [`get_pool`] returns the process-wide `&'static PgPool`, connecting on first use
//!   with `DATABASE_URL` (read through `dotenvy`).
//! - [`migrate`] applies `packages/api/migrations` (`users`, `oauth_states`, `documents`).
//! - [`PgDocumentStore`] is the [`store::DocumentStore`] backed by the `documents` table.

#[cfg(feature = "server")]
mod documents;
#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use documents::PgDocumentStore;
#[cfg(feature = "server")]
pub use pool::{get_pool, migrate};
