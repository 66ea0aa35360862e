use dioxus::prelude::*;

use store::{Action, Notice};
use ui::{push_notice, use_thoughts, ThoughtsProvider, ThoughtsView};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/?:signed_in&:error")]
    Thoughts { signed_in: String, error: String },
}

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start tokio runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use axum::routing::get;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let pool = api::db::get_pool()
        .await
        .expect("Failed to connect to database");

    api::db::migrate(pool)
        .await
        .expect("Failed to run migrations");

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .expect("Failed to create session table");

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * 7)
                .try_into()
                .expect("session expiry fits"),
        )); // 7 days

    let router = axum::Router::new()
        // OAuth callbacks go before the Dioxus routes
        .route("/auth/google/callback", get(google_callback))
        .route("/auth/github/callback", get(github_callback))
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router.into_make_service()).await {
        tracing::error!("Server stopped: {}", e);
    }
}

#[cfg(feature = "server")]
type CallbackQuery = axum::extract::Query<std::collections::HashMap<String, String>>;

#[cfg(feature = "server")]
async fn google_callback(
    query: CallbackQuery,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    oauth_callback(api::auth::OAuthProvider::Google, query, session).await
}

#[cfg(feature = "server")]
async fn github_callback(
    query: CallbackQuery,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    oauth_callback(api::auth::OAuthProvider::GitHub, query, session).await
}

/// Finish sign-in for `provider` and store the user id in the session.
#[cfg(feature = "server")]
async fn oauth_callback(
    provider: api::auth::OAuthProvider,
    axum::extract::Query(params): CallbackQuery,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    use axum::response::Redirect;

    let Some(code) = params.get("code") else {
        tracing::error!("{} callback missing code", provider);
        return Redirect::to("/?error=missing_code");
    };
    let Some(state) = params.get("state") else {
        tracing::error!("{} callback missing state", provider);
        return Redirect::to("/?error=missing_state");
    };

    let flow = match api::auth::OAuthFlow::new(provider) {
        Ok(flow) => flow,
        Err(e) => {
            tracing::error!("Failed to configure {} OAuth: {}", provider, e);
            return Redirect::to("/?error=config_error");
        }
    };

    let user = match flow.exchange_code(code, state).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("{} OAuth exchange error: {}", provider, e);
            return Redirect::to("/?error=oauth_error");
        }
    };

    if let Err(e) = session
        .insert(api::auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
    {
        tracing::error!("Failed to set session: {}", e);
        return Redirect::to("/?error=session_error");
    }
    if let Err(e) = session.save().await {
        tracing::error!("Failed to save session: {}", e);
        return Redirect::to("/?error=session_save_error");
    }
    Redirect::to("/?signed_in=1")
}

#[component]
fn App() -> Element {
    rsx! {
        ThoughtsProvider {
            Router::<Route> {}
        }
    }
}

/// The single page. The OAuth callback lands here with `?signed_in=1` or `?error=`.
#[component]
fn Thoughts(signed_in: String, error: String) -> Element {
    let ctx = use_thoughts();
    let nav = use_navigator();

    use_hook(move || {
        if !signed_in.is_empty() {
            spawn(async move {
                ctx.run(Action::CompleteSignIn).await;
            });
            // Drop the marker so a reload does not announce it again
            nav.replace(Route::Thoughts {
                signed_in: String::new(),
                error: String::new(),
            });
        } else if !error.is_empty() {
            let mut notices = ctx.notices;
            let duration = ctx.config.peek().notices.duration_secs;
            push_notice(
                &mut notices,
                Notice::error("Failed to sign in. Please try again."),
                duration,
            );
        }
    });

    rsx! {
        ThoughtsView {}
    }
}
