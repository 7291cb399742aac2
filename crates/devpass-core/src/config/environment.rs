//! Deployment environment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The environment a devpass deployment runs in.
///
/// Development tokens are a non-production fallback, so the environment
/// decides how strict secret handling is and whether the scheme is
/// available at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development. The placeholder secret is tolerated.
    #[default]
    Development,
    /// Shared pre-production environments.
    Staging,
    /// Production. Development tokens are disabled.
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parses_lowercase() {
        let env: Environment = serde_yaml::from_str("staging").unwrap();
        assert_eq!(env, Environment::Staging);
        assert_eq!(env.to_string(), "staging");
    }

    #[test]
    fn test_default_is_development() {
        assert!(Environment::default().is_development());
        assert!(!Environment::default().is_production());
    }
}
