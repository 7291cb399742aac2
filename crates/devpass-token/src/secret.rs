//! Shared secret handling.

use rand::RngCore;
use zeroize::Zeroizing;

/// Length in bytes of generated secrets.
pub const GENERATED_SECRET_LEN: usize = 32;

/// The HMAC key shared between issuer and verifier.
///
/// Bytes are wiped on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct Secret(Zeroizing<Vec<u8>>);

impl Secret {
    /// Wrap raw secret bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Generate a random secret, hex encoded so it can live in an env var.
    pub fn generate_hex() -> String {
        let mut rng = rand::rng();
        let mut bytes = Zeroizing::new([0u8; GENERATED_SECRET_LEN]);
        rng.fill_bytes(&mut bytes[..]);
        hex::encode(&bytes[..])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::from_bytes(value.as_bytes())
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::from_bytes(value.into_bytes())
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_secret_is_hex() {
        let secret = Secret::generate_hex();
        assert_eq!(secret.len(), GENERATED_SECRET_LEN * 2);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(secret, Secret::generate_hex());
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::from("hunter2");
        assert_eq!(format!("{secret:?}"), "Secret(<redacted>)");
    }
}
