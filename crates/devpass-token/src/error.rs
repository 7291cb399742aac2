//! Error types for development tokens.

use thiserror::Error;

/// Errors that can occur while issuing or verifying a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The caller supplied unusable input (e.g. an empty claim).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The secret or scheme tag is missing or unusable.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// The token could not be parsed.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The token carries a different scheme tag.
    #[error("wrong token scheme: expected {expected:?}, found {found:?}")]
    WrongScheme { expected: String, found: String },

    /// The signature does not match the claim and timestamp.
    #[error("token signature mismatch")]
    BadSignature,

    /// The token is outside its validity window.
    #[error("token issued at {issued_at} is not valid at {now}")]
    Expired { issued_at: u64, now: u64 },
}

impl TokenError {
    /// Whether this error rejects a presented token, as opposed to a
    /// caller or configuration defect.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::Malformed(_)
                | TokenError::WrongScheme { .. }
                | TokenError::BadSignature
                | TokenError::Expired { .. }
        )
    }
}
