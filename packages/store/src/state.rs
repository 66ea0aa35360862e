//! In-memory application state: the signed-in user and the visible notes.

use crate::models::{Note, User};

/// A single state change, produced by [`crate::ThoughtKeeper`] after a request completes.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    SignedIn(User),
    SignedOut,
    /// Replace the whole list after a successful fetch.
    Replace(Vec<Note>),
    /// Add a freshly created note.
    Append(Note),
    /// Drop the note with this id, if present.
    Remove(String),
    /// Replace the list with an authoritative fetch taken after a write.
    Reconcile(Vec<Note>),
}

/// Difference between the optimistic list and an authoritative fetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Drift {
    /// Ids we showed that the store no longer has.
    pub missing: Vec<String>,
    /// Ids the store has that we did not show.
    pub unexpected: Vec<String>,
}

impl Drift {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThoughtsState {
    pub user: Option<User>,
    pub notes: Vec<Note>,
}

impl ThoughtsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the current user may see a delete control for `note`.
    pub fn can_delete(&self, note: &Note) -> bool {
        self.user.as_ref().is_some_and(|u| note.is_authored_by(u))
    }

    pub fn apply(&mut self, transition: Transition) -> Drift {
        match transition {
            Transition::SignedIn(user) => self.user = Some(user),
            Transition::SignedOut => self.user = None,
            Transition::Replace(notes) => self.notes = notes,
            Transition::Append(note) => self.notes.push(note),
            Transition::Remove(id) => self.notes.retain(|n| n.id != id),
            Transition::Reconcile(notes) => return self.reconcile(notes),
        }
        Drift::default()
    }

    pub fn apply_all(&mut self, transitions: impl IntoIterator<Item = Transition>) -> Drift {
        let mut drift = Drift::default();
        for transition in transitions {
            let d = self.apply(transition);
            drift.missing.extend(d.missing);
            drift.unexpected.extend(d.unexpected);
        }
        drift
    }

    fn reconcile(&mut self, authoritative: Vec<Note>) -> Drift {
        let has = |list: &[Note], id: &str| list.iter().any(|n| n.id == id);
        let drift = Drift {
            missing: self
                .notes
                .iter()
                .filter(|n| !has(&authoritative, &n.id))
                .map(|n| n.id.clone())
                .collect(),
            unexpected: authoritative
                .iter()
                .filter(|n| !has(&self.notes, &n.id))
                .map(|n| n.id.clone())
                .collect(),
        };
        if !drift.is_empty() {
            tracing::warn!(
                missing = drift.missing.len(),
                unexpected = drift.unexpected.len(),
                "local thoughts drifted from the store"
            );
        }
        self.notes = authoritative;
        drift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, author: &str) -> Note {
        Note {
            id: id.into(),
            title: format!("title {id}"),
            content: "body".into(),
            author_id: author.into(),
            author_name: author.into(),
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut state = ThoughtsState::new();
        assert!(!state.is_signed_in());

        state.apply(Transition::SignedIn(User::new("a", Some("A"))));
        assert!(state.is_signed_in());

        state.apply(Transition::SignedOut);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_list_transitions() {
        let mut state = ThoughtsState::new();
        state.apply(Transition::Replace(vec![note("1", "a"), note("2", "b")]));
        state.apply(Transition::Append(note("3", "a")));
        assert_eq!(state.notes.len(), 3);

        state.apply(Transition::Remove("2".into()));
        let ids: Vec<_> = state.notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);

        // Unknown id leaves the list alone
        state.apply(Transition::Remove("nope".into()));
        assert_eq!(state.notes.len(), 2);
    }

    #[test]
    fn test_delete_control_only_for_author() {
        let mut state = ThoughtsState::new();
        let mine = note("1", "a");
        let theirs = note("2", "b");

        // Nobody signed in
        assert!(!state.can_delete(&mine));
        assert!(!state.can_delete(&theirs));

        state.apply(Transition::SignedIn(User::new("a", None)));
        assert!(state.can_delete(&mine));
        assert!(!state.can_delete(&theirs));
    }

    #[test]
    fn test_reconcile_reports_drift() {
        let mut state = ThoughtsState::new();
        state.apply_all([
            Transition::Replace(vec![note("1", "a")]),
            Transition::Append(note("2", "a")),
        ]);

        let drift = state.apply(Transition::Reconcile(vec![note("2", "a"), note("9", "b")]));
        assert_eq!(drift.missing, ["1"]);
        assert_eq!(drift.unexpected, ["9"]);
        assert_eq!(state.notes.len(), 2);

        let again = state.apply(Transition::Reconcile(state.notes.clone()));
        assert!(again.is_empty());
    }
}
