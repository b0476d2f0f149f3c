//! Provider response types for the OAuth flow.

use secrecy::SecretString;
use serde::Deserialize;

/// OAuth token response from the provider's token endpoint.
///
/// Created once per code exchange and discarded after the profile fetch;
/// nothing in this crate persists it. Token material is held as
/// [`SecretString`] so `Debug` output and logs never contain it.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthToken {
    /// Bearer credential for subsequent provider API calls.
    pub access_token: SecretString,
    /// Seconds until the access token expires, as reported by the provider.
    pub expires_in: i64,
    /// Granted scopes.
    #[serde(default)]
    pub scope: String,
    /// Token type (usually "Bearer").
    pub token_type: String,
    /// OpenID Connect ID token, when the `openid` scope was granted.
    #[serde(default)]
    pub id_token: Option<SecretString>,
}

/// Authenticated user's profile from the provider's userinfo endpoint.
///
/// Fields are populated exactly as returned by the provider; the caller
/// (session/user-persistence layer) decides what to keep.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    /// Provider's unique user identifier.
    pub id: String,
    /// User's email address.
    pub email: String,
    /// Whether the provider has verified the email address.
    #[serde(default)]
    pub verified_email: bool,
    /// User's display name.
    #[serde(default)]
    pub name: Option<String>,
    /// User's given name.
    #[serde(default)]
    pub given_name: Option<String>,
    /// User's family name.
    #[serde(default)]
    pub family_name: Option<String>,
    /// User's profile picture URL.
    #[serde(default)]
    pub picture: Option<String>,
    /// User's locale code.
    #[serde(default)]
    pub locale: Option<String>,
}
