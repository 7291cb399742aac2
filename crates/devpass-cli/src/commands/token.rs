//! Token commands.
//!
//! `devpass token issue` - Issue a token for an identity.
//! `devpass token verify` - Verify a token with the shared secret.
//! `devpass token inspect` - Show a token's fields without verification.

use super::{SecretOverrides, resolve_secret};
use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use devpass_core::DevPassConfig;
use devpass_token::{DevToken, Issuer, Secret, TokenState, Verifier};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Issue a token for `claim` at `now`.
pub fn issue(
    config: &DevPassConfig,
    secret: &SecretOverrides,
    claim: &str,
    now: u64,
    output: Option<&Path>,
    quiet: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let secret = Secret::from(resolve_secret(config, secret)?);
    let window = config.validity_window()?;
    let issuer = Issuer::with_scheme_tag(secret, &config.scheme_tag)?;

    let token = issuer
        .issue(claim, now)
        .with_context(|| format!("Failed to issue a token for {claim:?}"))?;
    let token_str = token.to_string();

    if let Some(output_path) = output {
        fs::write(output_path, &token_str)
            .with_context(|| format!("Failed to write token to {}", output_path.display()))?;
        writeln!(out, "✔ Token written to: {}", output_path.display())?;
    } else {
        writeln!(out, "{token_str}")?;
        if quiet {
            return Ok(());
        }
    }

    writeln!(out)?;
    writeln!(out, "  Claim:   {claim}")?;
    writeln!(out, "  Issued:  {}", format_timestamp(token.issued_at))?;
    writeln!(
        out,
        "  Expires: {} (valid for {})",
        format_timestamp(token.expires_at(window)),
        humantime::format_duration(Duration::from_secs(window.as_secs()))
    )?;
    writeln!(out)?;
    writeln!(out, "Example usage:")?;
    writeln!(
        out,
        "  curl -H \"Authorization: Bearer {token_str}\" http://localhost:8080/admin"
    )?;
    writeln!(out, "  export DEVPASS_TOKEN='{token_str}'")?;
    writeln!(out)?;
    writeln!(
        out,
        "⚠️  Development credential. Anyone holding it acts as {claim} until it expires."
    )?;

    Ok(())
}

/// Verify a token (or a file containing one) at `now`.
pub fn verify(
    config: &DevPassConfig,
    secret: &SecretOverrides,
    token: &str,
    now: u64,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let secret = Secret::from(resolve_secret(config, secret)?);
    let verifier =
        Verifier::with_scheme_tag(secret, &config.scheme_tag, config.validity_window()?)?;
    let token_str = read_token_arg(token)?;

    // The failure is reported once, by main, on stderr
    let verified = verifier
        .verify(&token_str, now)
        .context("Token verification failed")?;

    writeln!(out, "✔ Token is valid")?;
    writeln!(out)?;
    writeln!(out, "Token Details:")?;
    writeln!(out, "  Claim:   {}", verified.claim)?;
    writeln!(out, "  Issued:  {}", format_timestamp(verified.issued_at))?;
    writeln!(out, "  Expires: {}", format_timestamp(verified.expires_at))?;
    Ok(())
}

/// Show a token's fields and lifecycle state without the secret.
pub fn inspect(
    config: &DevPassConfig,
    token: &str,
    now: u64,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let window = config.validity_window()?;
    let token_str = read_token_arg(token)?;
    let token = DevToken::parse(&token_str)?;
    let state = token.state(now, window);

    writeln!(out, "Token Information (signature not verified):")?;
    writeln!(out, "  Scheme:  {}", token.scheme_tag)?;
    if token.scheme_tag != config.scheme_tag {
        writeln!(out, "           (expected {:?})", config.scheme_tag)?;
    }
    writeln!(out, "  Claim:   {}", token.claim)?;
    writeln!(out, "  Issued:  {}", format_timestamp(token.issued_at))?;
    writeln!(out, "  Expires: {}", format_timestamp(token.expires_at(window)))?;
    writeln!(out, "  State:   {state}")?;
    if state == TokenState::Valid {
        let remaining = token.expires_at(window).saturating_sub(now);
        writeln!(
            out,
            "  Remaining: {}",
            humantime::format_duration(Duration::from_secs(remaining))
        )?;
    }

    Ok(())
}

/// Accept either a token or a path to a file holding one.
fn read_token_arg(token: &str) -> anyhow::Result<String> {
    let path = Path::new(token);
    if path.is_file() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read token file: {}", path.display()))?;
        return Ok(content.trim().to_string());
    }
    Ok(token.trim().to_string())
}

fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| format!("{secs} (unix)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use devpass_core::Environment;
    use tempfile::tempdir;

    const T0: u64 = 1_700_000_000;

    fn flag_secret(secret: &str) -> SecretOverrides {
        SecretOverrides {
            secret: Some(secret.to_string()),
            secret_file: None,
        }
    }

    fn issue_quiet(config: &DevPassConfig, claim: &str, now: u64) -> String {
        let mut out = Vec::new();
        issue(config, &flag_secret("s3cret"), claim, now, None, true, &mut out).unwrap();
        String::from_utf8(out).unwrap().trim().to_string()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(T0), "2023-11-14T22:13:20Z");
        assert_eq!(format_timestamp(u64::MAX), format!("{} (unix)", u64::MAX));
    }

    #[test]
    fn test_issue_prints_token_expiry_and_usage() {
        let mut out = Vec::new();
        issue(
            &DevPassConfig::default(),
            &flag_secret("s3cret"),
            "alice@example.com",
            T0,
            None,
            false,
            &mut out,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();

        let token = out.lines().next().unwrap();
        assert!(token.starts_with("dev:alice@example.com:1700000000:"));
        assert!(out.contains("Expires: 2023-11-15T22:13:20Z"));
        assert!(out.contains(&format!("Authorization: Bearer {token}")));
        assert!(!out.contains("s3cret"));
    }

    #[test]
    fn test_issue_quiet_prints_only_token() {
        let token = issue_quiet(&DevPassConfig::default(), "alice@example.com", T0);
        assert_eq!(token.lines().count(), 1);
        assert!(DevToken::parse(&token).is_ok());
    }

    #[test]
    fn test_issue_to_file() {
        let dir = tempdir().unwrap();
        let token_path = dir.path().join("admin.token");

        let mut out = Vec::new();
        issue(
            &DevPassConfig::default(),
            &flag_secret("s3cret"),
            "alice@example.com",
            T0,
            Some(&token_path),
            false,
            &mut out,
        )
        .unwrap();

        let token = fs::read_to_string(&token_path).unwrap();
        assert!(token.starts_with("dev:alice@example.com:"));
        assert!(String::from_utf8(out).unwrap().contains("Token written to"));
    }

    #[test]
    fn test_issue_empty_claim_fails() {
        let mut out = Vec::new();
        let result = issue(
            &DevPassConfig::default(),
            &flag_secret("s3cret"),
            "",
            T0,
            None,
            true,
            &mut out,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_issue_refuses_placeholder_in_staging() {
        let config = DevPassConfig {
            environment: Environment::Staging,
            ..DevPassConfig::default()
        };
        let mut out = Vec::new();
        let result = issue(
            &config,
            &flag_secret(devpass_core::PLACEHOLDER_SECRET),
            "alice@example.com",
            T0,
            None,
            true,
            &mut out,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_from_file() {
        let dir = tempdir().unwrap();
        let token_path = dir.path().join("admin.token");
        let token = issue_quiet(&DevPassConfig::default(), "alice@example.com", T0);
        fs::write(&token_path, format!("{token}\n")).unwrap();

        let mut out = Vec::new();
        verify(
            &DevPassConfig::default(),
            &flag_secret("s3cret"),
            &token_path.to_string_lossy(),
            T0 + 60,
            &mut out,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("✔ Token is valid"));
        assert!(out.contains("Claim:   alice@example.com"));
    }

    #[test]
    fn test_verify_reports_failure() {
        let token = issue_quiet(&DevPassConfig::default(), "alice@example.com", T0);

        let mut out = Vec::new();
        let result = verify(
            &DevPassConfig::default(),
            &flag_secret("other"),
            &token,
            T0,
            &mut out,
        );
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.starts_with("Token verification failed"), "{err}");
        assert!(err.contains("signature mismatch"), "{err}");
        assert!(out.is_empty());
    }

    #[test]
    fn test_verify_honours_configured_scheme_tag() {
        let config = DevPassConfig {
            scheme_tag: "staging".into(),
            ..DevPassConfig::default()
        };
        let token = issue_quiet(&config, "alice@example.com", T0);
        assert!(token.starts_with("staging:"));

        let mut out = Vec::new();
        verify(&config, &flag_secret("s3cret"), &token, T0, &mut out).unwrap();

        let mut out = Vec::new();
        let result = verify(
            &DevPassConfig::default(),
            &flag_secret("s3cret"),
            &token,
            T0,
            &mut out,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_inspect_shows_state() {
        let config = DevPassConfig::default();
        let token = issue_quiet(&config, "alice@example.com", T0);

        let mut out = Vec::new();
        inspect(&config, &token, T0 + 3600, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Claim:   alice@example.com"));
        assert!(out.contains("State:   valid"));
        assert!(out.contains("Remaining: 23h"));

        let mut out = Vec::new();
        inspect(&config, &token, T0 + 2 * 86_400, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("State:   expired"));
    }

    #[test]
    fn test_inspect_rejects_garbage() {
        let mut out = Vec::new();
        assert!(inspect(&DevPassConfig::default(), "garbage", T0, &mut out).is_err());
    }
}
