//! Secret management commands.
//!
//! `devpass secret generate` - Generate a new shared secret.

use anyhow::Context;
use devpass_token::Secret;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Generate a new random shared secret.
pub fn generate(output: Option<&Path>, out: &mut impl Write) -> anyhow::Result<()> {
    let secret = Secret::generate_hex();

    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, &secret)
            .with_context(|| format!("Failed to write secret to {}", path.display()))?;
        restrict_permissions(path)?;

        writeln!(out, "✔ Generated shared secret: {}", path.display())?;
        writeln!(out)?;
        writeln!(
            out,
            "⚠️  Keep this secret out of version control. Anyone holding it can mint admin tokens."
        )?;
        writeln!(out)?;
        writeln!(out, "Reference it from devpass.yaml:")?;
        writeln!(out, "  secret:")?;
        writeln!(out, "    file: {}", path.display())?;
        writeln!(out)?;
        writeln!(out, "Or set it as an environment variable:")?;
        writeln!(out, "  export DEVPASS_SECRET=$(cat {})", path.display())?;
    } else {
        writeln!(out, "{secret}")?;
    }

    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}
