//! Error types for the Worldpay CSE SDK.

use std::collections::BTreeSet;

use thiserror::Error;

/// Result type alias for CSE operations.
pub type Result<T> = std::result::Result<T, CseError>;

/// Errors that can occur while validating or encrypting card data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CseError {
    /// One or more card fields failed validation.
    ///
    /// Carries the full set of numeric error codes so a caller can highlight
    /// every invalid field at once. See [`crate::validation`] for the code
    /// meanings.
    #[error("invalid card data: {0:?}")]
    InvalidCardData(BTreeSet<u32>),

    /// The public key text is malformed or the key could not be constructed.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// An underlying cipher primitive rejected its input.
    ///
    /// Not expected under the fixed RSA1_5 + A256GCM parameters; indicates a
    /// programming-invariant violation rather than a recoverable condition.
    #[error("encryption failed: {0}")]
    EncryptionFailure(String),

    /// Generic encryption error, e.g. `encrypt` called before a public key
    /// was set.
    #[error("{0}")]
    EncryptionError(String),
}

impl CseError {
    /// Returns the validation error codes if this is an
    /// [`CseError::InvalidCardData`], otherwise `None`.
    #[must_use]
    pub fn error_codes(&self) -> Option<&BTreeSet<u32>> {
        match self {
            Self::InvalidCardData(codes) => Some(codes),
            _ => None,
        }
    }
}
