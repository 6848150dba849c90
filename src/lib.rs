//! Yandex Cloud API client with transparent IAM token management.
//!
//! A long-lived OAuth token is exchanged for short-lived IAM tokens on demand;
//! [`TokenManager`] caches the IAM token and refreshes it shortly before expiry.

mod client;

pub mod clock;
pub mod config;
pub mod errors;
pub mod resources;
pub mod telemetry;
pub mod token;

pub use client::YandexCloudClient;
pub use config::Config;
pub use errors::{Error, Result};
pub use token::{
    CachedToken, CredentialExchanger, IamTokenExchanger, RefreshMode, TokenLifetimePolicy,
    TokenManager,
};

#[cfg(test)]
mod tests;
