//! Google OAuth provider implementation.
//!
//! HTTP client for Google's OAuth 2.0 authorization-code flow: consent URL
//! generation, code-for-token exchange, and userinfo retrieval.

use async_trait::async_trait;
use log::*;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::config::{
    Config, DEFAULT_GOOGLE_AUTH_URL, DEFAULT_GOOGLE_TOKEN_URL, DEFAULT_GOOGLE_USERINFO_URL,
};
use crate::error::{
    config_error, oauth_error, ConfigErrorKind, Error, ErrorKind, HttpErrorKind, OAuthErrorKind,
};
use crate::oauth::{OAuthToken, ProviderKind, SocialProvider, UserProfile};

/// Endpoint URLs for the Google OAuth flow.
///
/// Defaults point at Google; override to target a mock server in tests.
#[derive(Debug, Clone)]
pub struct GoogleOAuthUrls {
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl Default for GoogleOAuthUrls {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_GOOGLE_AUTH_URL.to_string(),
            token_url: DEFAULT_GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: DEFAULT_GOOGLE_USERINFO_URL.to_string(),
        }
    }
}

/// Request to exchange an authorization code for tokens
#[derive(Debug, Serialize)]
struct TokenExchangeRequest {
    code: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    grant_type: String,
}

/// Google OAuth provider.
///
/// Holds immutable client credentials and endpoint URLs plus a shared
/// `reqwest::Client`. Each operation is a single blocking-on-await HTTP call
/// with no retry policy; failures surface as tagged [`Error`] outcomes.
#[derive(Debug)]
pub struct Provider {
    client: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    scope: String,
    urls: GoogleOAuthUrls,
}

impl Provider {
    /// Create a new Google OAuth provider with configurable endpoint URLs.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        scope: &str,
        urls: GoogleOAuthUrls,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            client_id: client_id.to_string(),
            client_secret: SecretString::from(client_secret.to_string()),
            redirect_uri: redirect_uri.to_string(),
            scope: scope.to_string(),
            urls,
        })
    }

    /// Create a provider from runtime configuration.
    ///
    /// Fails with a config error when client ID, client secret, or redirect
    /// URI are not set.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let client_id = config
            .google_client_id()
            .ok_or_else(|| config_error(ConfigErrorKind::MissingSetting, "google_client_id"))?;
        let client_secret = config
            .google_client_secret()
            .ok_or_else(|| config_error(ConfigErrorKind::MissingSetting, "google_client_secret"))?;
        let redirect_uri = config
            .google_redirect_uri()
            .ok_or_else(|| config_error(ConfigErrorKind::MissingSetting, "google_redirect_uri"))?;

        Self::new(
            &client_id,
            &client_secret,
            &redirect_uri,
            config.google_scope(),
            GoogleOAuthUrls {
                auth_url: config.google_auth_url().to_string(),
                token_url: config.google_token_url().to_string(),
                userinfo_url: config.google_userinfo_url().to_string(),
            },
        )
    }

    /// Verify that an access token is still accepted by the provider.
    ///
    /// Returns `Ok(false)` for any non-success status; errors only on
    /// transport failure.
    pub async fn verify_token(&self, token: &OAuthToken) -> Result<bool, Error> {
        let response = self
            .client
            .get(&self.urls.userinfo_url)
            .header(reqwest::header::AUTHORIZATION, bearer_header(token)?)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to verify Google token: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: ErrorKind::OAuth(OAuthErrorKind::Network),
                }
            })?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl SocialProvider for Provider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Google
    }

    /// Generate the OAuth authorization URL for user consent.
    ///
    /// Pure string composition over static configuration; the query string
    /// carries exactly `scope`, `response_type`, `client_id` and
    /// `redirect_uri`, percent-encoded.
    fn authorization_url(&self) -> String {
        let params = [
            ("scope", self.scope.as_str()),
            ("response_type", "code"),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!("{}?{}", self.urls.auth_url, query_string);
        debug!("Built Google authorization URL: {}", url);
        url
    }

    /// Exchange an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Result<OAuthToken, Error> {
        let request = TokenExchangeRequest {
            code: code.to_string(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.expose_secret().clone(),
            redirect_uri: self.redirect_uri.clone(),
            grant_type: "authorization_code".to_string(),
        };

        debug!("Exchanging Google OAuth code for tokens");

        let response = self
            .client
            .post(&self.urls.token_url)
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to exchange Google OAuth code: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: ErrorKind::OAuth(OAuthErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let token: OAuthToken = response.json().await.map_err(|e| {
                warn!("Failed to parse Google token response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: ErrorKind::OAuth(OAuthErrorKind::InvalidResponse),
                }
            })?;
            info!("Successfully exchanged Google OAuth code for tokens");
            Ok(token)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Google OAuth token exchange error: {}", error_text);
            Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed,
                &error_text,
            ))
        }
    }

    /// Get the authenticated user's profile using the access token.
    async fn get_user_info(&self, token: &OAuthToken) -> Result<UserProfile, Error> {
        let response = self
            .client
            .get(&self.urls.userinfo_url)
            .header(reqwest::header::AUTHORIZATION, bearer_header(token)?)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to get Google user info: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: ErrorKind::OAuth(OAuthErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let profile: UserProfile = response.json().await.map_err(|e| {
                warn!("Failed to parse Google user info: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: ErrorKind::OAuth(OAuthErrorKind::InvalidResponse),
                }
            })?;
            info!("Fetched Google user info for provider id {}", profile.id);
            Ok(profile)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Google user info error: {}", error_text);
            Err(oauth_error(OAuthErrorKind::UserInfoFailed, &error_text))
        }
    }
}

/// Build the `Authorization: Bearer <token>` header, marked sensitive so it
/// is excluded from any debug output of the request.
fn bearer_header(token: &OAuthToken) -> Result<reqwest::header::HeaderValue, Error> {
    let auth_value = format!("Bearer {}", token.access_token.expose_secret());

    let mut header_value = reqwest::header::HeaderValue::from_str(&auth_value).map_err(|e| {
        warn!("Failed to create auth header: {:?}", e);
        Error {
            source: Some(Box::new(e)),
            error_kind: ErrorKind::Http(HttpErrorKind::RequestFailed),
        }
    })?;
    header_value.set_sensitive(true);

    Ok(header_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};

    const TOKEN_BODY: &str = r#"{
        "access_token": "tok",
        "expires_in": 3598,
        "scope": "openid email profile",
        "token_type": "Bearer",
        "id_token": "id-tok"
    }"#;

    const USERINFO_BODY: &str = r#"{
        "id": "42",
        "email": "a@b.com",
        "verified_email": true,
        "name": "John Doe",
        "given_name": "John",
        "family_name": "Doe",
        "picture": "https://lh3.googleusercontent.com/photo.jpg",
        "locale": "en"
    }"#;

    async fn setup_test_server() -> ServerGuard {
        Server::new_async().await
    }

    fn create_provider(server_url: &str) -> Provider {
        Provider::new(
            "client-123",
            "secret-456",
            "http://localhost:4000/auth/google/callback",
            "openid email profile",
            GoogleOAuthUrls {
                auth_url: format!("{}/auth", server_url),
                token_url: format!("{}/token", server_url),
                userinfo_url: format!("{}/userinfo", server_url),
            },
        )
        .unwrap()
    }

    fn test_token() -> OAuthToken {
        serde_json::from_str(TOKEN_BODY).unwrap()
    }

    #[test]
    fn test_authorization_url_contains_exactly_four_params() {
        let provider = create_provider("http://localhost:9999");
        let url = provider.authorization_url();

        let (base, query) = url.split_once('?').expect("URL should contain '?'");
        assert_eq!(base, "http://localhost:9999/auth");

        let params: Vec<(&str, &str)> = query
            .split('&')
            .map(|pair| pair.split_once('=').expect("each pair should be k=v"))
            .collect();

        assert_eq!(
            params,
            vec![
                ("scope", "openid%20email%20profile"),
                ("response_type", "code"),
                ("client_id", "client-123"),
                (
                    "redirect_uri",
                    "http%3A%2F%2Flocalhost%3A4000%2Fauth%2Fgoogle%2Fcallback"
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server.url());

        let mock = server
            .mock("POST", "/token")
            .match_header(
                "content-type",
                Matcher::Regex("application/x-www-form-urlencoded".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), "abc123".into()),
                Matcher::UrlEncoded("client_id".into(), "client-123".into()),
                Matcher::UrlEncoded("client_secret".into(), "secret-456".into()),
                Matcher::UrlEncoded(
                    "redirect_uri".into(),
                    "http://localhost:4000/auth/google/callback".into(),
                ),
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TOKEN_BODY)
            .create_async()
            .await;

        let token = provider.exchange_code("abc123").await.unwrap();

        mock.assert_async().await;
        assert_eq!(token.access_token.expose_secret(), "tok");
        assert_eq!(token.expires_in, 3598);
        assert_eq!(token.scope, "openid email profile");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(
            token.id_token.as_ref().map(|t| t.expose_secret().as_str()),
            Some("id-tok")
        );
    }

    #[tokio::test]
    async fn test_exchange_code_non_success_status_is_tagged_error() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server.url());

        let token_mock = server
            .mock("POST", "/token")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;
        // The flow must stop at the failed exchange.
        let userinfo_mock = server
            .mock("GET", "/userinfo")
            .expect(0)
            .create_async()
            .await;

        let result = provider.exchange_code("expired-code").await;

        token_mock.assert_async().await;
        userinfo_mock.assert_async().await;
        let err = result.unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed)
        );
    }

    #[tokio::test]
    async fn test_exchange_code_malformed_body_is_deserialization_error() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server.url());

        let _mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json at all")
            .create_async()
            .await;

        let err = provider.exchange_code("abc123").await.unwrap_err();

        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::InvalidResponse)
        );
    }

    #[tokio::test]
    async fn test_get_user_info_sends_single_bearer_request() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server.url());

        let mock = server
            .mock("GET", "/userinfo")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(USERINFO_BODY)
            .expect(1)
            .create_async()
            .await;

        let profile = provider.get_user_info(&test_token()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(profile.id, "42");
        assert_eq!(profile.email, "a@b.com");
        assert!(profile.verified_email);
        assert_eq!(profile.name.as_deref(), Some("John Doe"));
        assert_eq!(
            profile.picture.as_deref(),
            Some("https://lh3.googleusercontent.com/photo.jpg")
        );
    }

    #[tokio::test]
    async fn test_get_user_info_non_success_status_is_tagged_error() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server.url());

        let _mock = server
            .mock("GET", "/userinfo")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 401, "message": "Invalid Credentials"}}"#)
            .create_async()
            .await;

        let err = provider.get_user_info(&test_token()).await.unwrap_err();

        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::UserInfoFailed)
        );
    }

    #[tokio::test]
    async fn test_verify_token_reports_status_without_error() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server.url());

        let _valid = server
            .mock("GET", "/userinfo")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(USERINFO_BODY)
            .create_async()
            .await;

        assert!(provider.verify_token(&test_token()).await.unwrap());

        let _expired = server
            .mock("GET", "/userinfo")
            .with_status(401)
            .create_async()
            .await;

        assert!(!provider.verify_token(&test_token()).await.unwrap());
    }

    #[tokio::test]
    async fn test_full_flow_code_to_profile() {
        let mut server = setup_test_server().await;
        let provider = create_provider(&server.url());

        let token_mock = server
            .mock("POST", "/token")
            .match_body(Matcher::UrlEncoded("code".into(), "abc123".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TOKEN_BODY)
            .create_async()
            .await;
        let userinfo_mock = server
            .mock("GET", "/userinfo")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(USERINFO_BODY)
            .create_async()
            .await;

        let token = provider.exchange_code("abc123").await.unwrap();
        let profile = provider.get_user_info(&token).await.unwrap();

        token_mock.assert_async().await;
        userinfo_mock.assert_async().await;
        assert_eq!(profile.id, "42");
        assert_eq!(profile.email, "a@b.com");
    }

    #[test]
    fn test_provider_debug_redacts_client_secret() {
        let provider = create_provider("http://localhost:9999");

        let debug_output = format!("{:?}", provider);
        assert!(!debug_output.contains("secret-456"));
        assert!(debug_output.contains("client-123"));
    }

    #[test]
    fn test_from_config_requires_credentials() {
        use clap::Parser as _;

        let config = Config::try_parse_from(["social-oauth"]).unwrap();
        let err = Provider::from_config(&config).unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::Config(ConfigErrorKind::MissingSetting)
        );

        let config = Config::try_parse_from([
            "social-oauth",
            "--google-client-id",
            "client-123",
            "--google-client-secret",
            "secret-456",
            "--google-redirect-uri",
            "http://localhost:4000/auth/google/callback",
        ])
        .unwrap();
        let provider = Provider::from_config(&config).unwrap();
        assert_eq!(provider.provider(), ProviderKind::Google);
    }
}
