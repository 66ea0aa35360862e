//! # OAuth 2.0 authorization-code flow with PKCE
//!
//! [`OAuthFlow`] drives sign-in for any [`OAuthProvider`]:
//!
//! 1. **[`authorize_url`](OAuthFlow::authorize_url)** builds the provider URL with the
//!    provider's scopes and a random PKCE challenge, and stores the CSRF state and
//!    verifier in `oauth_states` with a 10-minute expiry.
//! 2. **[`exchange_code`](OAuthFlow::exchange_code)** runs from the
//!    `/auth/<provider>/callback` route in the `web` crate. It consumes the matching
//!    `oauth_states` row (state check and expiry in one query), trades the code for an
//!    access token, reads the provider profile and upserts the `users` row keyed on
//!    `(provider, provider_id)`.
//!
//! The `users.id` from that row is the stable identity notes are attributed to.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use serde::Deserialize;

use super::config::OAuthConfig;
use super::OAuthProvider;
use crate::db::get_pool;
use crate::models::User;

/// Google userinfo response.
#[derive(Debug, Deserialize)]
struct GoogleProfile {
    id: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

/// GitHub `/user` response.
#[derive(Debug, Deserialize)]
struct GitHubProfile {
    id: i64,
    login: String,
    email: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

/// The provider profile fields we keep.
#[derive(Debug)]
struct Profile {
    provider_id: String,
    email: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

pub struct OAuthFlow {
    provider: OAuthProvider,
    config: OAuthConfig,
}

impl OAuthFlow {
    pub fn new(provider: OAuthProvider) -> Result<Self, String> {
        let config = OAuthConfig::from_env(provider)?;
        Ok(Self { provider, config })
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Build the provider's authorization URL and remember the PKCE verifier.
    pub async fn authorize_url(&self) -> Result<String, String> {
        let client = self.create_client();
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let scopes = self
            .provider
            .scopes()
            .iter()
            .map(|s| Scope::new(s.to_string()));
        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(scopes)
            .set_pkce_challenge(pkce_challenge)
            .url();

        let pool = get_pool().await.map_err(|e| e.to_string())?;
        sqlx::query(
            r#"
            INSERT INTO oauth_states (state, provider, pkce_verifier, expires_at)
            VALUES ($1, $2, $3, NOW() + INTERVAL '10 minutes')
            "#,
        )
        .bind(csrf_state.secret())
        .bind(self.provider.as_str())
        .bind(pkce_verifier.secret())
        .execute(pool)
        .await
        .map_err(|e| e.to_string())?;

        Ok(auth_url.to_string())
    }

    /// Finish sign-in: validate state, exchange the code, upsert the user.
    pub async fn exchange_code(&self, code: &str, state: &str) -> Result<User, String> {
        let pool = get_pool().await.map_err(|e| e.to_string())?;

        let row: Option<(String,)> = sqlx::query_as(
            r#"
            DELETE FROM oauth_states
            WHERE state = $1 AND provider = $2 AND expires_at > NOW()
            RETURNING pkce_verifier
            "#,
        )
        .bind(state)
        .bind(self.provider.as_str())
        .fetch_optional(pool)
        .await
        .map_err(|e| e.to_string())?;

        let pkce_verifier = row.ok_or("Invalid or expired OAuth state")?.0;

        // No redirects on the token endpoint
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| e.to_string())?;

        let token = self
            .create_client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| format!("Token exchange failed: {}", e))?;

        let profile = self.fetch_profile(token.access_token().secret()).await?;
        tracing::info!(provider = %self.provider, "OAuth sign-in for {}", profile.provider_id);

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (email, name, avatar_url, provider, provider_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (provider, provider_id)
            DO UPDATE SET
                email = EXCLUDED.email,
                name = EXCLUDED.name,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.avatar_url)
        .bind(self.provider.as_str())
        .bind(&profile.provider_id)
        .fetch_one(pool)
        .await
        .map_err(|e| e.to_string())?;

        Ok(user)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<Profile, String> {
        let api_client = reqwest::Client::new();

        match self.provider {
            OAuthProvider::Google => {
                let google: GoogleProfile = api_client
                    .get("https://www.googleapis.com/oauth2/v2/userinfo")
                    .bearer_auth(access_token)
                    .send()
                    .await
                    .map_err(|e| e.to_string())?
                    .json()
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(Profile {
                    provider_id: google.id,
                    email: google.email,
                    name: google.name,
                    avatar_url: google.picture,
                })
            }
            OAuthProvider::GitHub => {
                let github: GitHubProfile = api_client
                    .get("https://api.github.com/user")
                    .bearer_auth(access_token)
                    .header("User-Agent", "thoughts")
                    .send()
                    .await
                    .map_err(|e| e.to_string())?
                    .json()
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(Profile {
                    provider_id: github.id.to_string(),
                    email: github.email,
                    name: github.name.or(Some(github.login)),
                    avatar_url: github.avatar_url,
                })
            }
        }
    }
}
