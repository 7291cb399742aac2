//! Shared secret sources.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default environment variable holding the shared secret.
pub const DEFAULT_SECRET_ENV: &str = "DEVPASS_SECRET";

/// Where to find the HMAC secret shared by issuer and verifier.
///
/// Sources are tried in order: environment variable, file, inline value.
#[derive(Clone, Serialize, Deserialize)]
pub struct SecretConfig {
    /// Environment variable containing the secret.
    #[serde(default = "default_secret_env")]
    pub env: Option<String>,

    /// Path to a file containing the secret.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Inline secret value. Prefer `env` or `file`.
    #[serde(default)]
    pub value: Option<String>,
}

impl Default for SecretConfig {
    fn default() -> Self {
        Self {
            env: default_secret_env(),
            file: None,
            value: None,
        }
    }
}

impl std::fmt::Debug for SecretConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretConfig")
            .field("env", &self.env)
            .field("file", &self.file)
            .field("value", &self.value.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl SecretConfig {
    /// Resolve the secret, looking environment variables up through `lookup`.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<Option<String>, std::io::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Try environment variable first
        if let Some(env_var) = &self.env
            && let Some(secret) = lookup(env_var)
        {
            return Ok(Some(secret));
        }

        // Try file path
        if let Some(path) = &self.file {
            let secret = std::fs::read_to_string(path)?;
            return Ok(Some(secret.trim().to_string()));
        }

        Ok(self.value.clone())
    }

    /// Anchor a relative `file` path at `base_dir`.
    pub(crate) fn rebase(&mut self, base_dir: &Path) {
        if let Some(file) = &self.file
            && file.is_relative()
        {
            self.file = Some(base_dir.join(file));
        }
    }

    /// Describe the configured sources for error messages.
    pub fn describe_sources(&self) -> String {
        let mut sources = Vec::new();
        if let Some(env) = &self.env {
            sources.push(format!("${env}"));
        }
        if let Some(file) = &self.file {
            sources.push(format!("file {}", file.display()));
        }
        if self.value.is_some() {
            sources.push("inline value".to_string());
        }
        if sources.is_empty() {
            "no sources configured".to_string()
        } else {
            sources.join(", ")
        }
    }
}

fn default_secret_env() -> Option<String> {
    Some(DEFAULT_SECRET_ENV.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_env_takes_precedence() {
        let config = SecretConfig {
            env: Some("MY_SECRET".into()),
            file: None,
            value: Some("inline".into()),
        };
        let resolved = config
            .resolve_with(|name| (name == "MY_SECRET").then(|| "from-env".to_string()))
            .unwrap();
        assert_eq!(resolved.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_file_is_trimmed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  file-secret  ").unwrap();

        let config = SecretConfig {
            env: Some("UNSET".into()),
            file: Some(file.path().to_path_buf()),
            value: Some("inline".into()),
        };
        let resolved = config.resolve_with(|_| None).unwrap();
        assert_eq!(resolved.as_deref(), Some("file-secret"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let config = SecretConfig {
            env: None,
            file: Some(PathBuf::from("/nonexistent/devpass.key")),
            value: None,
        };
        assert!(config.resolve_with(|_| None).is_err());
    }

    #[test]
    fn test_falls_back_to_inline_value() {
        let config = SecretConfig {
            value: Some("inline".into()),
            ..SecretConfig::default()
        };
        let resolved = config.resolve_with(|_| None).unwrap();
        assert_eq!(resolved.as_deref(), Some("inline"));
    }

    #[test]
    fn test_debug_redacts_inline_value() {
        let config = SecretConfig {
            value: Some("hunter2".into()),
            ..SecretConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
