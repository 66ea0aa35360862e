//! Application context: thoughts state, notices, config, and the sign-in controls.

use api::auth::OAuthProvider;
use dioxus::prelude::*;
use store::{Action, Dispatched, Notice, ThoughtError, ThoughtsConfig, ThoughtsState};

use crate::notices::{push_notice, Notices};
use crate::remote::make_keeper;
use crate::icons::{FaGithub, FaGoogle, FaRightFromBracket};
use crate::Icon;

/// Handles to the shared signals. `Copy`, so event handlers can capture it freely.
#[derive(Clone, Copy)]
pub struct ThoughtsContext {
    pub state: Signal<ThoughtsState>,
    pub notices: Signal<Notices>,
    pub config: Signal<ThoughtsConfig>,
    /// True until the first session check and list fetch completed.
    pub loading: Signal<bool>,
}

impl ThoughtsContext {
    /// Run one action and apply its outcome. Signs in with Google.
    pub async fn run(self, action: Action) -> Dispatched {
        self.run_with(action, OAuthProvider::Google).await
    }

    pub async fn run_with(mut self, action: Action, provider: OAuthProvider) -> Dispatched {
        let config = self.config.peek().clone();
        let keeper = make_keeper(&config, provider);
        let user = self.state.peek().user.clone();

        let mut dispatched = keeper.dispatch(action, user.as_ref()).await;

        // Completion handler: the only place state changes
        self.state.write().apply_all(dispatched.transitions.clone());
        if let Some(notice) = dispatched.notice.clone() {
            push_notice(&mut self.notices, notice, config.notices.duration_secs);
        }
        if let Some(url) = dispatched.redirect.clone() {
            let navigated = navigate_to(&url);
            if let Some(notice) = settle_redirect(&mut dispatched, navigated) {
                push_notice(&mut self.notices, notice, config.notices.duration_secs);
            }
        }
        dispatched
    }
}

/// A failed navigation keeps us on this page: drop the redirect so callers stop
/// waiting for it, and report the sign-in as failed.
fn settle_redirect(dispatched: &mut Dispatched, navigated: Result<(), String>) -> Option<Notice> {
    let e = navigated.err()?;
    tracing::error!("Failed to open sign-in page: {}", e);
    dispatched.redirect = None;
    Some(Notice::from(&ThoughtError::SignIn(e)))
}

fn navigate_to(url: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or("no window")?;
        window
            .location()
            .set_href(url)
            .map_err(|e| format!("{:?}", e))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("Sign-in continues at {}", url);
        Ok(())
    }
}

/// Get the shared thoughts context.
pub fn use_thoughts() -> ThoughtsContext {
    use_context::<ThoughtsContext>()
}

/// Provider component that owns the application state.
/// On mount it loads the config, restores the session and fetches the list.
#[component]
pub fn ThoughtsProvider(children: Element) -> Element {
    let state = use_signal(ThoughtsState::default);
    let notices = use_signal(Notices::default);
    let mut config = use_signal(ThoughtsConfig::default);
    let mut loading = use_signal(|| true);

    let ctx = use_context_provider(|| ThoughtsContext {
        state,
        notices,
        config,
        loading,
    });

    let _ = use_resource(move || async move {
        match api::get_config().await {
            Ok(loaded) => config.set(loaded),
            Err(e) => tracing::warn!("Using default config: {}", e),
        }
        ctx.run(Action::Restore).await;
        ctx.run(Action::Load).await;
        loading.set(false);
    });

    rsx! {
        {children}
    }
}

/// Button that starts sign-in with a specific provider.
#[component]
pub fn LoginButton(
    #[props(default = "google".to_string())] provider: String,
    #[props(default = "Sign in to use the app.".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let ctx = use_thoughts();
    let mut pending = use_signal(|| false);
    let parsed = provider.parse::<OAuthProvider>().unwrap_or(OAuthProvider::Google);

    let onclick = move |_| async move {
        pending.set(true);
        let dispatched = ctx.run_with(Action::SignIn, parsed).await;
        // A redirect leaves the page; anything else re-enables the button
        if dispatched.redirect.is_none() {
            pending.set(false);
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: pending(),
            onclick: onclick,
            if parsed == OAuthProvider::GitHub {
                Icon { width: 16, height: 16, icon: FaGithub }
            } else {
                Icon { width: 16, height: 16, icon: FaGoogle }
            }
            span {
                if pending() { "Loading..." } else { "{label}" }
            }
        }
    }
}

/// Shows the signed-in user's name and a logout button.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let ctx = use_thoughts();
    let state = ctx.state;
    let name = state()
        .user
        .and_then(|u| u.display_name)
        .unwrap_or_default();

    let onclick = move |_| async move {
        ctx.run(Action::SignOut).await;
    };

    rsx! {
        div {
            class: "session",
            span { class: "session-name", "{name}" }
            button {
                class: "{class}",
                onclick: onclick,
                Icon { width: 16, height: 16, icon: FaRightFromBracket }
                span { "{label}" }
            }
        }
    }
}
