//! CLI command implementations for devpass.

pub mod secret;
pub mod token;

use anyhow::Context;
use devpass_core::{DEFAULT_CONFIG_FILE, DevPassConfig};
use std::path::{Path, PathBuf};

/// Secret sources given on the command line. They replace the sources in
/// the configuration file but still go through its environment policy.
#[derive(Debug, Default)]
pub struct SecretOverrides {
    pub secret: Option<String>,
    pub secret_file: Option<PathBuf>,
}

impl SecretOverrides {
    fn is_empty(&self) -> bool {
        self.secret.is_none() && self.secret_file.is_none()
    }
}

/// Load the configuration file and apply a validity override.
///
/// An explicit path must exist. Without one, `./devpass.yaml` is used when
/// present and defaults otherwise.
pub fn load_config(path: Option<&Path>, validity: Option<String>) -> anyhow::Result<DevPassConfig> {
    let mut config = match path {
        Some(path) => DevPassConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            DevPassConfig::from_file(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("Failed to load config file: {DEFAULT_CONFIG_FILE}"))?
        }
        None => {
            tracing::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            DevPassConfig::default()
        }
    };

    if let Some(validity) = validity {
        config.validity_window = validity;
        config.validate().context("Invalid --validity")?;
    }

    Ok(config)
}

/// Resolve the shared secret, preferring command-line sources.
pub fn resolve_secret(
    config: &DevPassConfig,
    overrides: &SecretOverrides,
) -> anyhow::Result<String> {
    if overrides.is_empty() {
        return config.resolve_secret().context(
            "Shared secret not available. Pass --secret, --secret-file or set DEVPASS_SECRET",
        );
    }

    let mut config = config.clone();
    config.secret.env = None;
    config.secret.file = overrides.secret_file.clone();
    config.secret.value = overrides.secret.clone();
    config
        .resolve_secret()
        .context("Failed to resolve the shared secret from --secret/--secret-file")
}

pub fn unix_now_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
