use dioxus::prelude::*;
use store::Note;

use crate::icons::FaTrash;
use crate::Icon;

/// One thought in the grid. The delete control renders only when `can_delete`.
#[component]
pub fn ThoughtCard(note: Note, can_delete: bool, on_delete: EventHandler<String>) -> Element {
    let id = note.id.clone();

    rsx! {
        div {
            class: "thought-card",
            div {
                class: "thought-header",
                h3 { class: "thought-title", "{note.title}" }
                p { class: "thought-author", "by {note.author_name}" }
            }
            p { class: "thought-content", "{note.content}" }
            if can_delete {
                button {
                    class: "thought-delete",
                    title: "Delete thought",
                    onclick: move |_| on_delete.call(id.clone()),
                    Icon { width: 14, height: 14, icon: FaTrash }
                    span { class: "sr-only", "Delete thought" }
                }
            }
        }
    }
}
