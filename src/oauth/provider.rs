//! OAuth provider trait and provider identification.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::{OAuthToken, UserProfile};
use crate::error::Error;

/// Known social login providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Google,
}

impl ProviderKind {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
        }
    }
}

/// Trait for social OAuth 2.0 providers.
///
/// Each implementation covers one provider's authorization-code flow:
/// consent-screen URL generation, code exchange, and profile retrieval.
/// Calls are one-shot and stateless; the web layer drives the sequence.
#[async_trait]
pub trait SocialProvider: Send + Sync {
    /// Get the provider kind.
    fn provider(&self) -> ProviderKind;

    /// Build the consent-screen redirect URL from static configuration.
    fn authorization_url(&self) -> String;

    /// Exchange an authorization code for an access token.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code from the OAuth callback
    async fn exchange_code(&self, code: &str) -> Result<OAuthToken, Error>;

    /// Fetch the authenticated user's profile using an access token.
    ///
    /// # Arguments
    ///
    /// * `token` - Token obtained from [`SocialProvider::exchange_code`]
    async fn get_user_info(&self, token: &OAuthToken) -> Result<UserProfile, Error>;
}
