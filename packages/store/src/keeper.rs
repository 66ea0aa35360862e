//! # Action dispatch
//!
//! [`ThoughtKeeper`] runs one user action against the note adapter or the identity
//! provider and reports what happened as data: the [`Transition`]s to apply to
//! [`crate::ThoughtsState`], an optional [`Notice`] for the user, and an optional
//! redirect URL when sign-in has to leave the page.
//!
//! The keeper never holds the state itself. The caller applies the transitions from
//! the completion of the request that produced them, so a failed action leaves the
//! state exactly as it was. The acting user is passed in explicitly on every call.
//!
//! After a successful create or delete the keeper fetches the list again and emits a
//! [`Transition::Reconcile`] after the optimistic patch. If that fetch fails the
//! optimistic patch stands.

use crate::document::DocumentStore;
use crate::error::ThoughtError;
use crate::identity::{IdentityProvider, SignInOutcome};
use crate::models::{NoteDraft, User};
use crate::notes::NoteStore;
use crate::notice::Notice;
use crate::state::Transition;

/// The user actions the view can trigger.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Fetch the full list.
    Load,
    /// Pick up the identity the provider already holds (e.g. after an OAuth redirect).
    Restore,
    /// Back from a provider redirect: restore the identity and report the sign-in.
    CompleteSignIn,
    SignIn,
    SignOut,
    Create(NoteDraft),
    Delete(String),
}

/// Everything an action produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dispatched {
    pub transitions: Vec<Transition>,
    pub notice: Option<Notice>,
    pub redirect: Option<String>,
}

impl Dispatched {
    fn failed(err: ThoughtError) -> Self {
        Self {
            notice: Some(Notice::from(&err)),
            ..Default::default()
        }
    }

    /// True when the action completed and raised a success notice.
    pub fn succeeded(&self) -> bool {
        self.notice.as_ref().is_some_and(|n| !n.is_error())
    }
}

pub struct ThoughtKeeper<S: DocumentStore, I: IdentityProvider> {
    notes: NoteStore<S>,
    identity: I,
}

impl<S: DocumentStore, I: IdentityProvider> ThoughtKeeper<S, I> {
    pub fn new(notes: NoteStore<S>, identity: I) -> Self {
        Self { notes, identity }
    }

    pub fn notes(&self) -> &NoteStore<S> {
        &self.notes
    }

    pub async fn dispatch(&self, action: Action, user: Option<&User>) -> Dispatched {
        match action {
            Action::Load => self.load().await,
            Action::Restore => self.restore().await,
            Action::CompleteSignIn => self.complete_sign_in().await,
            Action::SignIn => self.sign_in().await,
            Action::SignOut => self.sign_out().await,
            Action::Create(draft) => self.create(draft, user).await,
            Action::Delete(id) => self.delete(id).await,
        }
    }

    async fn load(&self) -> Dispatched {
        match self.notes.list_all().await {
            Ok(notes) => {
                tracing::info!(count = notes.len(), "fetched thoughts");
                Dispatched {
                    transitions: vec![Transition::Replace(notes)],
                    ..Default::default()
                }
            }
            Err(e) => {
                tracing::error!("Error fetching thoughts: {}", e);
                Dispatched::failed(e)
            }
        }
    }

    async fn restore(&self) -> Dispatched {
        match self.identity.current_user().await {
            Ok(Some(user)) => Dispatched {
                transitions: vec![Transition::SignedIn(user)],
                ..Default::default()
            },
            Ok(None) => Dispatched {
                transitions: vec![Transition::SignedOut],
                ..Default::default()
            },
            Err(e) => {
                tracing::warn!("Could not restore session: {}", e);
                Dispatched::default()
            }
        }
    }

    async fn complete_sign_in(&self) -> Dispatched {
        match self.identity.current_user().await {
            Ok(Some(user)) => {
                tracing::info!(user = %user.id, "signed in after redirect");
                Dispatched {
                    transitions: vec![Transition::SignedIn(user)],
                    notice: Some(Notice::success("Signed in successfully!")),
                    redirect: None,
                }
            }
            Ok(None) => {
                tracing::error!("Redirect sign-in left no session");
                Dispatched::failed(ThoughtError::SignIn("no session".into()))
            }
            Err(e) => {
                tracing::error!("Error signing in: {}", e);
                Dispatched::failed(ThoughtError::SignIn(e))
            }
        }
    }

    async fn sign_in(&self) -> Dispatched {
        match self.identity.sign_in().await {
            Ok(SignInOutcome::SignedIn(user)) => {
                tracing::info!(user = %user.id, "signed in");
                Dispatched {
                    transitions: vec![Transition::SignedIn(user)],
                    notice: Some(Notice::success("Signed in successfully!")),
                    redirect: None,
                }
            }
            Ok(SignInOutcome::Redirect { url }) => Dispatched {
                redirect: Some(url),
                ..Default::default()
            },
            Err(e) => {
                tracing::error!("Error signing in: {}", e);
                Dispatched::failed(ThoughtError::SignIn(e))
            }
        }
    }

    async fn sign_out(&self) -> Dispatched {
        match self.identity.sign_out().await {
            Ok(()) => Dispatched {
                transitions: vec![Transition::SignedOut],
                notice: Some(Notice::success("Signed out successfully!")),
                redirect: None,
            },
            Err(e) => {
                tracing::error!("Error signing out: {}", e);
                Dispatched::failed(ThoughtError::SignOut(e))
            }
        }
    }

    async fn create(&self, draft: NoteDraft, user: Option<&User>) -> Dispatched {
        match self.notes.create(&draft, user).await {
            Ok(Some(note)) => {
                tracing::info!(id = %note.id, "added thought");
                let mut transitions = vec![Transition::Append(note)];
                transitions.extend(self.refetch().await);
                Dispatched {
                    transitions,
                    notice: Some(Notice::success("Thought added successfully!")),
                    redirect: None,
                }
            }
            Ok(None) => Dispatched::default(),
            Err(e) => {
                tracing::error!("Error adding thought: {}", e);
                Dispatched::failed(e)
            }
        }
    }

    async fn delete(&self, id: String) -> Dispatched {
        match self.notes.remove(&id).await {
            Ok(()) => {
                tracing::info!(%id, "deleted thought");
                let mut transitions = vec![Transition::Remove(id)];
                transitions.extend(self.refetch().await);
                Dispatched {
                    transitions,
                    notice: Some(Notice::success("Thought deleted successfully!")),
                    redirect: None,
                }
            }
            Err(e) => {
                tracing::error!("Error deleting thought: {}", e);
                Dispatched::failed(e)
            }
        }
    }

    async fn refetch(&self) -> Option<Transition> {
        match self.notes.list_all().await {
            Ok(notes) => Some(Transition::Reconcile(notes)),
            Err(e) => {
                tracing::warn!("Keeping optimistic list, re-fetch failed: {}", e);
                None
            }
        }
    }
}
