//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::{FaGithub, FaGoogle};
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod remote;
pub use remote::{make_keeper, RemoteDocumentStore, RemoteIdentity};

pub mod views;
pub use views::ThoughtsView;

mod auth;
pub use auth::{use_thoughts, LoginButton, LogoutButton, ThoughtsContext, ThoughtsProvider};

pub mod notices;
pub use notices::{push_notice, use_notices, NoticeTray, Notices};

mod thought_form;
pub use thought_form::ThoughtForm;

mod thought_card;
pub use thought_card::ThoughtCard;
