//! Token wire format and lifecycle.

use crate::error::TokenError;
use std::fmt;
use std::time::Duration;

/// Scheme tag used when none is configured.
pub const DEFAULT_SCHEME_TAG: &str = "dev";

const DELIMITER: char = ':';

/// A development token, structurally parsed but not verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevToken {
    pub scheme_tag: String,
    pub claim: String,
    pub issued_at: u64,
    pub signature: String,
}

/// Where a token sits in its time-driven lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Within the validity window.
    Valid,
    /// Older than the validity window.
    Expired,
    /// Issued after `now`. Rejected, never clamped.
    NotYetValid,
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenState::Valid => "valid",
            TokenState::Expired => "expired",
            TokenState::NotYetValid => "not yet valid",
        };
        f.write_str(name)
    }
}

impl DevToken {
    /// Split a token into its fields.
    ///
    /// `issued_at` and `signature` are taken from the right, the scheme tag
    /// from the left, and everything in between is the claim, so claims
    /// containing `:` survive the round trip.
    pub fn parse(token: &str) -> Result<Self, TokenError> {
        let token = token.trim();

        let mut tail = token.rsplitn(3, DELIMITER);
        let signature = tail.next().unwrap_or_default();
        let issued_at = tail
            .next()
            .ok_or_else(|| TokenError::Malformed("expected 4 ':'-separated fields".into()))?;
        let head = tail
            .next()
            .ok_or_else(|| TokenError::Malformed("expected 4 ':'-separated fields".into()))?;
        let (scheme_tag, claim) = head
            .split_once(DELIMITER)
            .ok_or_else(|| TokenError::Malformed("expected 4 ':'-separated fields".into()))?;

        if scheme_tag.is_empty() {
            return Err(TokenError::Malformed("missing scheme tag".into()));
        }
        if claim.is_empty() {
            return Err(TokenError::Malformed("missing claim".into()));
        }
        if signature.is_empty() {
            return Err(TokenError::Malformed("missing signature".into()));
        }

        Ok(Self {
            scheme_tag: scheme_tag.to_string(),
            claim: claim.to_string(),
            issued_at: parse_timestamp(issued_at)?,
            signature: signature.to_string(),
        })
    }

    /// Lifecycle state at `now` for the given window.
    pub fn state(&self, now: u64, window: Duration) -> TokenState {
        if self.issued_at > now {
            TokenState::NotYetValid
        } else if now - self.issued_at > window.as_secs() {
            TokenState::Expired
        } else {
            TokenState::Valid
        }
    }

    /// Last second at which the token is still accepted.
    pub fn expires_at(&self, window: Duration) -> u64 {
        self.issued_at.saturating_add(window.as_secs())
    }
}

impl fmt::Display for DevToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            self.scheme_tag, self.claim, self.issued_at, self.signature
        )
    }
}

/// Canonical decimal only: digits, no sign, no leading zeros.
fn parse_timestamp(value: &str) -> Result<u64, TokenError> {
    let canonical = !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && (value == "0" || !value.starts_with('0'));
    if !canonical {
        return Err(TokenError::Malformed(format!(
            "issued_at {value:?} is not a decimal timestamp"
        )));
    }
    value
        .parse()
        .map_err(|_| TokenError::Malformed(format!("issued_at {value:?} is out of range")))
}

/// A scheme tag must match `[A-Za-z0-9_-]+`, so it survives trimming and
/// never contains the delimiter.
pub fn validate_scheme_tag(tag: &str) -> Result<(), TokenError> {
    if tag.is_empty() {
        return Err(TokenError::ConfigurationError(
            "scheme tag must not be empty".into(),
        ));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
    if !tag.chars().all(allowed) {
        return Err(TokenError::ConfigurationError(format!(
            "scheme tag {tag:?} may only contain ASCII letters, digits, '_' and '-'"
        )));
    }
    Ok(())
}
