//! Configuration types for devpass.
//!
//! Configuration is loaded from a single YAML file (`devpass.yaml` by
//! default). Every field has a default, so an empty file is a valid
//! development configuration that reads the secret from `$DEVPASS_SECRET`.
//!
//! ```yaml
//! environment: staging
//! scheme_tag: dev
//! validity_window: 24h
//! secret:
//!   env: DEVPASS_SECRET
//!   file: secrets/devpass.key
//! admin_emails:
//!   - alice@example.com
//! ```

pub mod environment;
pub mod secret;

use devpass_token::{DEFAULT_SCHEME_TAG, DEFAULT_VALIDITY_WINDOW, validate_scheme_tag};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub use environment::Environment;
pub use secret::{DEFAULT_SECRET_ENV, SecretConfig};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "devpass.yaml";

/// Placeholder secret shipped in sample configs. Rejected outside development.
pub const PLACEHOLDER_SECRET: &str = "CHANGE_ME";

/// Complete devpass configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevPassConfig {
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,

    /// Literal marking development tokens.
    #[serde(default = "default_scheme_tag")]
    pub scheme_tag: String,

    /// How long a token is accepted after issuance (e.g. "24h", "90m").
    #[serde(default = "default_validity_window")]
    pub validity_window: String,

    /// Shared secret sources.
    #[serde(default)]
    pub secret: SecretConfig,

    /// Identities granted admin rights by the HTTP layer.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

impl Default for DevPassConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            scheme_tag: default_scheme_tag(),
            validity_window: default_validity_window(),
            secret: SecretConfig::default(),
            admin_emails: Vec::new(),
        }
    }
}

fn default_scheme_tag() -> String {
    DEFAULT_SCHEME_TAG.to_string()
}

fn default_validity_window() -> String {
    humantime::format_duration(DEFAULT_VALIDITY_WINDOW).to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("invalid validity window {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("no shared secret configured (looked in: {sources})")]
    MissingSecret { sources: String },

    #[error("the placeholder secret may only be used in development, not {environment}")]
    PlaceholderSecret { environment: Environment },

    #[error("development tokens are disabled in production")]
    DisabledInProduction,
}

impl DevPassConfig {
    /// Load configuration from a YAML file.
    ///
    /// A relative `secret.file` is resolved against the directory holding
    /// the configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;

        if let Some(base_dir) = path.parent() {
            config.secret.rebase(base_dir);
        }

        Ok(config)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field-level constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_scheme_tag(&self.scheme_tag).map_err(|e| ConfigError::Config(e.to_string()))?;
        self.validity_window()?;
        Ok(())
    }

    /// Parsed validity window.
    pub fn validity_window(&self) -> Result<Duration, ConfigError> {
        parse_window(&self.validity_window)
    }

    /// Resolve the shared secret from the process environment.
    pub fn resolve_secret(&self) -> Result<String, ConfigError> {
        self.resolve_secret_with(|name| std::env::var(name).ok())
    }

    /// Resolve the shared secret and apply the environment policy.
    ///
    /// Fails closed: production disables the scheme, a missing or empty
    /// secret is an error, and the placeholder is only tolerated in
    /// development.
    pub fn resolve_secret_with<F>(&self, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.environment.is_production() {
            return Err(ConfigError::DisabledInProduction);
        }

        let secret = self
            .secret
            .resolve_with(lookup)?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingSecret {
                sources: self.secret.describe_sources(),
            })?;

        if secret == PLACEHOLDER_SECRET {
            if !self.environment.is_development() {
                return Err(ConfigError::PlaceholderSecret {
                    environment: self.environment,
                });
            }
            tracing::warn!(
                "Using the placeholder development secret; set a real one before sharing tokens"
            );
        }

        Ok(secret)
    }
}

/// Parse a humantime window like "24h" or "90m". Zero is rejected.
pub fn parse_window(value: &str) -> Result<Duration, ConfigError> {
    let window =
        humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidDuration {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
    if window.as_secs() == 0 {
        return Err(ConfigError::InvalidDuration {
            value: value.to_string(),
            reason: "must be at least one second".to_string(),
        });
    }
    Ok(window)
}
