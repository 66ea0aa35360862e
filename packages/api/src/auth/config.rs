//! OAuth client settings read from the environment.

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use super::OAuthProvider;

/// Client credentials and endpoints for one provider.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// Load `<PROVIDER>_CLIENT_ID` / `<PROVIDER>_CLIENT_SECRET` and the shared
    /// `AUTH_REDIRECT_URI` base (default `http://localhost:8080/auth/callback`).
    pub fn from_env(provider: OAuthProvider) -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let prefix = provider.env_prefix();
        let client_id = std::env::var(format!("{prefix}_CLIENT_ID"))
            .map_err(|_| format!("{prefix}_CLIENT_ID not set"))?;
        let client_secret = std::env::var(format!("{prefix}_CLIENT_SECRET"))
            .map_err(|_| format!("{prefix}_CLIENT_SECRET not set"))?;
        let redirect_base = std::env::var("AUTH_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/auth/callback".to_string());

        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            auth_url: AuthUrl::new(provider.auth_url().to_string()).map_err(|e| e.to_string())?,
            token_url: TokenUrl::new(provider.token_url().to_string())
                .map_err(|e| e.to_string())?,
            redirect_url: RedirectUrl::new(provider_redirect(&redirect_base, provider))
                .map_err(|e| e.to_string())?,
        })
    }
}

/// `.../auth/callback` becomes `.../auth/<provider>/callback`.
fn provider_redirect(base: &str, provider: OAuthProvider) -> String {
    base.replace("/callback", &format!("/{}/callback", provider.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_redirect() {
        assert_eq!(
            provider_redirect("https://thoughts.example/auth/callback", OAuthProvider::Google),
            "https://thoughts.example/auth/google/callback"
        );
        assert_eq!(
            provider_redirect("http://localhost:8080/auth/callback", OAuthProvider::GitHub),
            "http://localhost:8080/auth/github/callback"
        );
    }
}
