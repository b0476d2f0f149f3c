use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;

/// Default Google authorization (consent screen) endpoint.
pub const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Default Google token exchange endpoint.
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Default Google userinfo endpoint.
pub const DEFAULT_GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v1/userinfo";

/// Default OAuth scopes requested on the consent screen.
pub const DEFAULT_GOOGLE_SCOPE: &str = "openid email profile";

/// Immutable runtime configuration, read once at startup from CLI flags,
/// environment variables and an optional `.env` file. Values are opaque
/// strings; nothing is validated here beyond presence checks in accessors.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The Google OAuth client ID issued by the Google console.
    #[arg(long, env)]
    google_client_id: Option<String>,

    /// The Google OAuth client secret issued by the Google console.
    #[arg(long, env)]
    google_client_secret: Option<String>,

    /// The callback URL the provider redirects to after user consent.
    #[arg(long, env)]
    google_redirect_uri: Option<String>,

    /// The OAuth scopes to request on the consent screen.
    #[arg(long, env, default_value = DEFAULT_GOOGLE_SCOPE)]
    google_scope: String,

    /// The Google authorization endpoint URL.
    #[arg(long, env, default_value = DEFAULT_GOOGLE_AUTH_URL)]
    google_auth_url: String,

    /// The Google token endpoint URL.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_GOOGLE_TOKEN_URL)]
    google_token_url: String,

    /// The Google userinfo endpoint URL.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_GOOGLE_USERINFO_URL)]
    google_userinfo_url: String,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Returns the Google OAuth client ID, if configured.
    pub fn google_client_id(&self) -> Option<String> {
        self.google_client_id.clone()
    }

    /// Returns the Google OAuth client secret, if configured.
    pub fn google_client_secret(&self) -> Option<String> {
        self.google_client_secret.clone()
    }

    /// Returns the OAuth callback URL, if configured.
    pub fn google_redirect_uri(&self) -> Option<String> {
        self.google_redirect_uri.clone()
    }

    /// Returns the OAuth scopes requested on the consent screen.
    pub fn google_scope(&self) -> &str {
        &self.google_scope
    }

    /// Returns the Google authorization endpoint URL.
    pub fn google_auth_url(&self) -> &str {
        &self.google_auth_url
    }

    /// Returns the Google token endpoint URL.
    pub fn google_token_url(&self) -> &str {
        &self.google_token_url
    }

    /// Returns the Google userinfo endpoint URL.
    pub fn google_userinfo_url(&self) -> &str {
        &self.google_userinfo_url
    }
}
