//! Error types for credential storage and record handling.
//!
//! Resolver outcomes are not errors of this kind: they are reported through
//! [`QueryError`](crate::QueryError) inside a [`ModelQueryResult`](crate::ModelQueryResult).

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the resolver.
#[derive(Debug, Error)]
pub enum Error {
    /// Vendor not present in the registry.
    #[error("vendor not found: {0}")]
    VendorNotFound(String),

    /// Credentials not found for vendor.
    #[error("credentials not found for vendor: {0}")]
    CredentialsNotFound(String),

    /// Failed to access system keyring.
    #[error("keyring error: {0}")]
    Keyring(String),

    /// Empty or whitespace-only API key.
    #[error("invalid API key format")]
    InvalidApiKey,

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
