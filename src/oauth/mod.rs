//! OAuth 2.0 authorization-code flow infrastructure.
//!
//! Provides the provider abstraction, the provider response types, and the
//! concrete provider implementations.

mod provider;
mod types;

pub mod providers;

pub use provider::{ProviderKind, SocialProvider};
pub use types::{OAuthToken, UserProfile};
