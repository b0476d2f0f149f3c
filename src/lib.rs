//! # social-oauth
//!
//! OAuth 2.0 authorization-code flow client for social login providers:
//! - Authorization (consent screen) URL generation
//! - Authorization code exchange for an access token
//! - User profile retrieval with a bearer token
//!
//! ## Architecture
//!
//! This crate is the outbound-HTTP glue between a web layer and an external
//! identity provider. The web layer redirects the user with
//! [`oauth::providers::google::Provider::authorization_url`], receives the
//! callback code, and runs the remaining two steps:
//!
//! ```rust,ignore
//! use social_oauth::oauth::providers::google::Provider;
//!
//! let provider = Provider::from_config(&config)?;
//! let tokens = provider.exchange_code(&query.code).await?;
//! let profile = provider.get_user_info(&tokens).await?;
//! ```
//!
//! Each call is one-shot and stateless; session creation and user persistence
//! belong to the caller.

pub mod config;
pub mod error;
pub mod logging;
pub mod oauth;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
pub use oauth::{OAuthToken, SocialProvider, UserProfile};
