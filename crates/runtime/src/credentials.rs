//! Credential resolution and authorization URL construction
//!
//! Credentials come exclusively from the environment and are never persisted.
//! Resolution performs no network call: when the token is absent the outcome
//! is [`CredentialResolution::Pending`], carrying a ready-to-visit
//! authorization URL that mints a token the user exports manually.

use url::form_urlencoded;

use crate::config::{
    API_KEY_ENV_VAR, API_URL_ENV_VAR, AUTH_APP_NAME, AUTH_EXPIRATION, AUTH_SCOPE_ENV_VAR,
    AUTHORIZATION_BASE_URL, DEFAULT_API_BASE_URL, DEFAULT_AUTH_SCOPE, TOKEN_ENV_VAR,
};
use crate::deps::Environment;
use crate::error::TrelloError;

/// A complete key/token pair plus the request configuration derived from the
/// environment. Immutable after construction; supplies the `key` and `token`
/// query parameters on every API call.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// The Trello API key
    pub api_key: String,
    /// The Trello API token
    pub token: String,
    /// Scope the token was (or will be) authorized with
    pub auth_scope: String,
    /// API base URL, without a trailing slash
    pub api_base_url: String,
}

/// The authorization bootstrap state: the key exists but no token does yet.
#[derive(Debug, Clone)]
pub struct AuthPending {
    /// Fully formed authorization URL for the user to visit
    pub auth_url: String,
    /// Scope the link requests
    pub scope: String,
}

impl AuthPending {
    /// Human-readable instructions for completing the token bootstrap.
    pub fn instructions(&self) -> String {
        format!(
            "TRELLO_TOKEN is not configured. To grant access, open the link below \
             while signed in as a board member, approve the access request, and \
             export the token Trello displays as TRELLO_TOKEN:\n\n  {}",
            self.auth_url
        )
    }
}

/// Outcome of credential resolution.
///
/// Modeled as a two-state value rather than an error so callers branch on it
/// directly: `Pending` is a deliberate early exit, not a failure.
#[derive(Debug, Clone)]
pub enum CredentialResolution {
    /// Both key and token are configured; requests may proceed.
    Ready(Credentials),
    /// The token is missing; print the authorization URL and halt.
    Pending(AuthPending),
}

/// Resolve credentials from the environment.
///
/// Fails with [`TrelloError::MissingApiKey`] when the key is absent. Never
/// contacts the network; must complete before any API call is attempted.
pub fn resolve(env: &dyn Environment) -> Result<CredentialResolution, TrelloError> {
    let api_key = env.var(API_KEY_ENV_VAR).ok_or(TrelloError::MissingApiKey)?;
    let auth_scope = env
        .var(AUTH_SCOPE_ENV_VAR)
        .unwrap_or_else(|| DEFAULT_AUTH_SCOPE.to_string());
    let api_base_url = env
        .var(API_URL_ENV_VAR)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    match env.var(TOKEN_ENV_VAR) {
        Some(token) => Ok(CredentialResolution::Ready(Credentials {
            api_key,
            token,
            auth_scope,
            api_base_url,
        })),
        None => {
            let auth_url = authorization_url(&api_key, &auth_scope);
            Ok(CredentialResolution::Pending(AuthPending {
                auth_url,
                scope: auth_scope,
            }))
        }
    }
}

/// Build the one-time authorization URL for the given key and scope.
///
/// Trello displays a token on approval; the URL itself is only ever visited
/// by the user, never requested by this tool.
pub fn authorization_url(api_key: &str, scope: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("key", api_key)
        .append_pair("scope", scope)
        .append_pair("expiration", AUTH_EXPIRATION)
        .append_pair("name", AUTH_APP_NAME)
        .append_pair("response_type", "token")
        .finish();
    format!("{AUTHORIZATION_BASE_URL}?{query}")
}
