//! Keyed hashing over the claim and issuance time.

use crate::error::TokenError;
use crate::secret::Secret;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// The signed message: `claim ":" issued_at`.
pub fn payload(claim: &str, issued_at: u64) -> String {
    format!("{claim}:{issued_at}")
}

/// Lowercase hex HMAC-SHA256 of the payload under `secret`.
pub fn sign(secret: &Secret, claim: &str, issued_at: u64) -> Result<String, TokenError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| TokenError::ConfigurationError(format!("unusable secret: {e}")))?;
    mac.update(payload(claim, issued_at).as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Compare two signatures in constant time. Different lengths never match.
pub fn signatures_match(expected: &str, presented: &str) -> bool {
    expected.as_bytes().ct_eq(presented.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_format() {
        assert_eq!(
            payload("alice@example.com", 1_700_000_000),
            "alice@example.com:1700000000"
        );
    }

    #[test]
    fn test_rfc4231_case_2() {
        // HMAC-SHA256 with key "Jefe" over "what do ya want for nothing?"
        let secret = Secret::from("Jefe");
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(mac.finalize().into_bytes()),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_sign_is_lowercase_hex() {
        let sig = sign(&Secret::from("s3cret"), "alice@example.com", 1_700_000_000).unwrap();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_signatures_match() {
        assert!(signatures_match("abcd", "abcd"));
        assert!(!signatures_match("abcd", "abce"));
        assert!(!signatures_match("abcd", "abc"));
        assert!(!signatures_match("abcd", ""));
    }
}
