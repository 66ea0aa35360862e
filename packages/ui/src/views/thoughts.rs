use dioxus::prelude::*;
use store::Action;

use crate::{use_thoughts, LoginButton, LogoutButton, NoticeTray, ThoughtCard, ThoughtForm};

const THOUGHTS_CSS: Asset = asset!("/assets/thoughts.css");

/// The single page: header with sign-in controls, the form when signed in,
/// and every thought in a grid.
#[component]
pub fn ThoughtsView() -> Element {
    let ctx = use_thoughts();
    let state = ctx.state;
    let loading = ctx.loading;

    let on_delete = move |id: String| {
        spawn(async move {
            ctx.run(Action::Delete(id)).await;
        });
    };

    let current = state();
    let signed_in = current.is_signed_in();

    rsx! {
        document::Stylesheet { href: THOUGHTS_CSS }

        div {
            class: "thoughts-page",
            div {
                class: "thoughts-inner",

                div {
                    class: "thoughts-header",
                    h1 { "thoughts." }
                    if signed_in {
                        LogoutButton { class: "outline" }
                    } else {
                        div {
                            class: "login-buttons",
                            LoginButton { provider: "google", class: "outline" }
                            LoginButton {
                                provider: "github",
                                label: "Continue with GitHub",
                                class: "outline",
                            }
                        }
                    }
                }

                if signed_in {
                    ThoughtForm {}
                }

                if loading() && current.notes.is_empty() {
                    p { class: "thoughts-empty", "Loading..." }
                }

                div {
                    class: "thoughts-grid",
                    for note in current.notes.iter() {
                        ThoughtCard {
                            key: "{note.id}",
                            note: note.clone(),
                            can_delete: current.can_delete(note),
                            on_delete: on_delete,
                        }
                    }
                }
            }
        }

        NoticeTray {}
    }
}
