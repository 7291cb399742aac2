//! Token issuance.

use crate::error::TokenError;
use crate::secret::Secret;
use crate::signature;
use crate::token::{DEFAULT_SCHEME_TAG, DevToken, validate_scheme_tag};

/// Mints development tokens under a shared secret.
#[derive(Debug, Clone)]
pub struct Issuer {
    secret: Secret,
    scheme_tag: String,
}

impl Issuer {
    /// Create an issuer using the default `dev` scheme tag.
    pub fn new(secret: Secret) -> Result<Self, TokenError> {
        Self::with_scheme_tag(secret, DEFAULT_SCHEME_TAG)
    }

    /// Create an issuer with a custom scheme tag.
    pub fn with_scheme_tag(
        secret: Secret,
        scheme_tag: impl Into<String>,
    ) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::ConfigurationError(
                "shared secret must not be empty".into(),
            ));
        }
        let scheme_tag = scheme_tag.into();
        validate_scheme_tag(&scheme_tag)?;
        Ok(Self { secret, scheme_tag })
    }

    pub fn scheme_tag(&self) -> &str {
        &self.scheme_tag
    }

    /// Issue a token for `claim` at `now` (Unix seconds).
    ///
    /// The same `(secret, claim, now)` always yields the same token.
    pub fn issue(&self, claim: &str, now: u64) -> Result<DevToken, TokenError> {
        if claim.is_empty() {
            return Err(TokenError::InvalidInput("claim must not be empty".into()));
        }

        let signature = signature::sign(&self.secret, claim, now)?;
        tracing::debug!(claim, issued_at = now, "Issued development token");

        Ok(DevToken {
            scheme_tag: self.scheme_tag.clone(),
            claim: claim.to_string(),
            issued_at: now,
            signature,
        })
    }
}

/// Issue a serialized token with the default scheme tag.
pub fn issue(claim: &str, secret: &str, now: u64) -> Result<String, TokenError> {
    let issuer = Issuer::new(Secret::from(secret))?;
    Ok(issuer.issue(claim, now)?.to_string())
}
