//! # devpass-token
//!
//! Development admin tokens for environments where the real identity
//! provider is unavailable.
//!
//! A token asserts a claim (usually an email address) and carries its own
//! issuance time and an HMAC-SHA256 signature over both:
//!
//! ```text
//! dev:alice@example.com:1700000000:<64 hex chars>
//! ```
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `dev` | Scheme tag, keeps these tokens apart from production credentials |
//! | claim | Asserted identity. May itself contain `:` |
//! | issued_at | Unix seconds at issuance |
//! | signature | `hex(hmac_sha256(secret, claim ":" issued_at))` |
//!
//! The scheme is stateless. Validity is computed from the token, the
//! current time and the shared secret; there is no revocation.
//!
//! ```
//! use devpass_token::{Issuer, Secret, Verifier};
//! use std::time::Duration;
//!
//! let secret = Secret::from("s3cret");
//! let issuer = Issuer::new(secret.clone()).unwrap();
//! let token = issuer.issue("alice@example.com", 1_700_000_000).unwrap();
//!
//! let verifier = Verifier::new(secret, Duration::from_secs(86_400)).unwrap();
//! let verified = verifier.verify(&token.to_string(), 1_700_003_600).unwrap();
//! assert_eq!(verified.claim, "alice@example.com");
//! ```

pub mod error;
pub mod issuer;
pub mod secret;
pub mod signature;
pub mod token;
pub mod verifier;

pub use error::TokenError;
pub use issuer::{Issuer, issue};
pub use secret::Secret;
pub use token::{DEFAULT_SCHEME_TAG, DevToken, TokenState, validate_scheme_tag};
pub use verifier::{DEFAULT_VALIDITY_WINDOW, VerifiedClaim, Verifier, verify};
