//! Token verification.

use crate::error::TokenError;
use crate::secret::Secret;
use crate::signature;
use crate::token::{DEFAULT_SCHEME_TAG, DevToken, TokenState, validate_scheme_tag};
use std::time::Duration;

/// Validity window used when none is configured.
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Verifies development tokens under a shared secret.
#[derive(Debug, Clone)]
pub struct Verifier {
    secret: Secret,
    scheme_tag: String,
    window: Duration,
}

/// A claim extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaim {
    /// The asserted identity.
    pub claim: String,
    /// Unix seconds at issuance.
    pub issued_at: u64,
    /// Last Unix second at which the token is accepted.
    pub expires_at: u64,
}

impl Verifier {
    /// Create a verifier using the default `dev` scheme tag.
    pub fn new(secret: Secret, window: Duration) -> Result<Self, TokenError> {
        Self::with_scheme_tag(secret, DEFAULT_SCHEME_TAG, window)
    }

    /// Create a verifier expecting a custom scheme tag.
    pub fn with_scheme_tag(
        secret: Secret,
        scheme_tag: impl Into<String>,
        window: Duration,
    ) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::ConfigurationError(
                "shared secret must not be empty".into(),
            ));
        }
        let scheme_tag = scheme_tag.into();
        validate_scheme_tag(&scheme_tag)?;
        Ok(Self {
            secret,
            scheme_tag,
            window,
        })
    }

    pub fn scheme_tag(&self) -> &str {
        &self.scheme_tag
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Verify `token` at `now` (Unix seconds) and return its claim.
    ///
    /// Checks run in order: structure, scheme tag, signature, freshness.
    /// The specific failure is returned to the caller; HTTP layers must
    /// collapse it into a single unauthorized response.
    pub fn verify(&self, token: &str, now: u64) -> Result<VerifiedClaim, TokenError> {
        let result = self.check(token, now);
        if let Err(e) = &result {
            tracing::debug!(error = %e, "Rejected development token");
        }
        result
    }

    fn check(&self, token: &str, now: u64) -> Result<VerifiedClaim, TokenError> {
        let token = DevToken::parse(token)?;

        if token.scheme_tag != self.scheme_tag {
            return Err(TokenError::WrongScheme {
                expected: self.scheme_tag.clone(),
                found: token.scheme_tag,
            });
        }

        let expected = signature::sign(&self.secret, &token.claim, token.issued_at)?;
        if !signature::signatures_match(&expected, &token.signature) {
            return Err(TokenError::BadSignature);
        }

        match token.state(now, self.window) {
            TokenState::Valid => Ok(VerifiedClaim {
                expires_at: token.expires_at(self.window),
                issued_at: token.issued_at,
                claim: token.claim,
            }),
            TokenState::Expired | TokenState::NotYetValid => Err(TokenError::Expired {
                issued_at: token.issued_at,
                now,
            }),
        }
    }
}

/// Verify a serialized token with the default scheme tag and return its claim.
pub fn verify(
    token: &str,
    secret: &str,
    now: u64,
    window: Duration,
) -> Result<String, TokenError> {
    let verifier = Verifier::new(Secret::from(secret), window)?;
    Ok(verifier.verify(token, now)?.claim)
}
