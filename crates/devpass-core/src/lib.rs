//! # devpass-core
//!
//! Configuration shared by the devpass crates: where the shared secret
//! comes from, how long development tokens stay valid, which scheme tag
//! marks them, and which identities the HTTP layer treats as admins.

// Configuration types shared across all devpass crates
pub mod config;

pub use config::{
    ConfigError, DEFAULT_CONFIG_FILE, DEFAULT_SECRET_ENV, DevPassConfig, Environment,
    PLACEHOLDER_SECRET, SecretConfig,
};
