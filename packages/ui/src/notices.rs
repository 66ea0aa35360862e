use dioxus::prelude::*;
use store::{Notice, NoticeLevel};

#[derive(Clone, Debug, PartialEq)]
pub struct ShownNotice {
    pub id: u64,
    pub notice: Notice,
}

/// Notices currently on screen, newest last.
#[derive(Clone, Debug, Default)]
pub struct Notices {
    pub entries: Vec<ShownNotice>,
    next_id: u64,
}

impl Notices {
    fn push(&mut self, notice: Notice) -> u64 {
        self.next_id += 1;
        self.entries.push(ShownNotice {
            id: self.next_id,
            notice,
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|e| e.id != id);
    }
}

pub fn use_notices() -> Signal<Notices> {
    crate::use_thoughts().notices
}

/// Show `notice`, removing it again after `duration_secs` (0 keeps it until dismissed).
pub fn push_notice(notices: &mut Signal<Notices>, notice: Notice, duration_secs: u32) {
    let id = notices.write().push(notice);
    if duration_secs == 0 {
        return;
    }
    let mut notices = *notices;
    spawn(async move {
        sleep_secs(duration_secs).await;
        notices.write().dismiss(id);
    });
}

#[cfg(target_arch = "wasm32")]
async fn sleep_secs(secs: u32) {
    gloo_timers::future::sleep(std::time::Duration::from_secs(secs as u64)).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_secs(secs: u32) {
    tokio::time::sleep(std::time::Duration::from_secs(secs as u64)).await;
}

#[component]
pub fn NoticeTray() -> Element {
    let mut notices = use_notices();
    let entries = notices().entries.clone();

    rsx! {
        div {
            class: "notice-tray",
            for entry in entries {
                div {
                    key: "{entry.id}",
                    class: match entry.notice.level {
                        NoticeLevel::Error => "notice error",
                        NoticeLevel::Success => "notice success",
                    },
                    div {
                        class: "notice-text",
                        strong { "{entry.notice.title}" }
                        span { "{entry.notice.description}" }
                    }
                    button {
                        class: "notice-close",
                        title: "Dismiss",
                        onclick: move |_| notices.write().dismiss(entry.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut notices = Notices::default();
        let first = notices.push(Notice::success("one"));
        let second = notices.push(Notice::error("two"));
        assert_ne!(first, second);

        notices.dismiss(first);
        assert_eq!(notices.entries.len(), 1);
        assert_eq!(notices.entries[0].notice.description, "two");

        notices.dismiss(99);
        assert_eq!(notices.entries.len(), 1);
    }
}
