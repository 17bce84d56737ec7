//! Error types for Devis
//!
//! The pricing pipeline itself never fails. Errors only surface at the
//! edges: loading a catalog, decoding a request, reading configuration.

use thiserror::Error;

/// Result type alias using DevisError
pub type Result<T> = std::result::Result<T, DevisError>;

/// Unified error type for Devis operations
#[derive(Debug, Error)]
pub enum DevisError {
    // Catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // Caller input errors
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Offer catalog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Duplicate offer id: {id}")]
    DuplicateOffer { id: String },

    #[error("Offer with empty id in channel {channel}")]
    EmptyOfferId { channel: String },

    #[error("Mandatory offer missing from catalog: {id}")]
    MissingMandatoryOffer { id: String },

    #[error("Malformed catalog: {0}")]
    Malformed(String),
}

/// Errors raised while decoding caller-supplied values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unsupported commitment: {0} (expected comptant, 24, 36 or 48)")]
    UnsupportedCommitment(String),
}

impl From<serde_json::Error> for DevisError {
    fn from(err: serde_json::Error) -> Self {
        DevisError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for DevisError {
    fn from(err: std::io::Error) -> Self {
        DevisError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for DevisError {
    fn from(err: anyhow::Error) -> Self {
        DevisError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DevisError::Catalog(CatalogError::DuplicateOffer {
            id: "site-vitrine".to_string(),
        });
        assert!(err.to_string().contains("site-vitrine"));
    }

    #[test]
    fn test_input_error_lists_accepted_values() {
        let err: DevisError = InputError::UnsupportedCommitment("12".to_string()).into();
        let message = err.to_string();
        assert!(message.contains("12"));
        assert!(message.contains("comptant"));
    }
}
