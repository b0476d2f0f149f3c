//! Concrete OAuth provider implementations.

pub mod google;
