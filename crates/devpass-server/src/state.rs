use crate::error::SetupError;
use devpass_core::DevPassConfig;
use devpass_token::{Secret, Verifier};
use std::collections::HashSet;

/// Identities allowed to act as admin. Matching ignores ASCII case and
/// surrounding whitespace. An empty list admits nobody.
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList {
    emails: HashSet<String>,
}

impl AdminAllowList {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails
            .into_iter()
            .map(|e| normalize(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        Self { emails }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&normalize(email))
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Shared state for [`crate::require_dev_admin`].
#[derive(Debug, Clone)]
pub struct DevAuthState {
    verifier: Verifier,
    admins: AdminAllowList,
}

impl DevAuthState {
    pub fn new(verifier: Verifier, admins: AdminAllowList) -> Self {
        Self { verifier, admins }
    }

    /// Build the verifier and allow-list from configuration.
    ///
    /// Fails when the secret cannot be resolved, including in production
    /// where development tokens are disabled.
    pub fn from_config(config: &DevPassConfig) -> Result<Self, SetupError> {
        let secret = config.resolve_secret()?;
        Self::with_secret(config, Secret::from(secret))
    }

    /// Like [`Self::from_config`] with an already resolved secret.
    pub fn with_secret(config: &DevPassConfig, secret: Secret) -> Result<Self, SetupError> {
        config.validate()?;
        let verifier =
            Verifier::with_scheme_tag(secret, &config.scheme_tag, config.validity_window()?)?;
        let admins = AdminAllowList::new(&config.admin_emails);

        if admins.is_empty() {
            tracing::warn!("No admin_emails configured; every development token will be refused");
        }
        tracing::info!(
            environment = %config.environment,
            scheme_tag = %config.scheme_tag,
            window = %config.validity_window,
            admins = admins.len(),
            "Development token authentication enabled"
        );

        Ok(Self::new(verifier, admins))
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    pub fn admins(&self) -> &AdminAllowList {
        &self.admins
    }
}
