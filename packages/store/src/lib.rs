pub mod config;
pub mod document;
pub mod error;
pub mod identity;
pub mod keeper;
pub mod models;
pub mod notes;
pub mod notice;
pub mod state;

mod memory;
pub use memory::MemoryDocumentStore;

pub use config::ThoughtsConfig;
pub use document::{DocumentStore, Record, StoredDocument};
pub use error::{StoreError, ThoughtError};
pub use identity::{IdentityProvider, SignInOutcome};
pub use keeper::{Action, Dispatched, ThoughtKeeper};
pub use models::{Note, NoteDraft, User};
pub use notes::NoteStore;
pub use notice::{Notice, NoticeLevel};
pub use state::{Drift, ThoughtsState, Transition};
