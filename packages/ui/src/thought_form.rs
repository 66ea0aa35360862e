use dioxus::prelude::*;
use store::{Action, NoteDraft};

use crate::icons::FaPlus;
use crate::{use_thoughts, Icon};

/// Inline form for adding a thought. Clears itself after a successful add.
#[component]
pub fn ThoughtForm() -> Element {
    let ctx = use_thoughts();
    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = NoteDraft::new(title(), content());
        spawn(async move {
            if ctx.run(Action::Create(draft)).await.succeeded() {
                title.set(String::new());
                content.set(String::new());
            }
        });
    };

    rsx! {
        form {
            class: "thought-form",
            onsubmit: handle_submit,

            input {
                class: "thought-input",
                r#type: "text",
                placeholder: "Title",
                value: title(),
                oninput: move |evt: FormEvent| title.set(evt.value()),
            }
            textarea {
                class: "thought-input",
                placeholder: "Your thought...",
                value: content(),
                oninput: move |evt: FormEvent| content.set(evt.value()),
            }
            button {
                class: "primary wide",
                r#type: "submit",
                Icon { width: 16, height: 16, icon: FaPlus }
                span { "Add Thought" }
            }
        }
    }
}
