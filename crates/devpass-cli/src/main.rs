use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{SecretOverrides, load_config, unix_now_seconds};

#[derive(Parser, Debug)]
#[command(name = "devpass", version, about = "Development admin tokens")]
struct Cli {
    /// Configuration file. Defaults to ./devpass.yaml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue, verify and inspect development tokens
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },

    /// Shared secret management
    Secret {
        #[command(subcommand)]
        cmd: SecretCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Issue a token asserting the given identity
    Issue {
        /// Identity to assert, usually an email address
        claim: String,

        #[command(flatten)]
        secret: SecretArgs,

        /// Override the validity window (e.g. "24h", "90m")
        #[arg(long)]
        validity: Option<String>,

        /// Write the token to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print only the token
        #[arg(long, short, default_value_t = false)]
        quiet: bool,
    },

    /// Verify a token (or a file containing one) with the shared secret
    Verify {
        token: String,

        #[command(flatten)]
        secret: SecretArgs,

        /// Override the validity window (e.g. "24h", "90m")
        #[arg(long)]
        validity: Option<String>,
    },

    /// Show a token's fields without checking its signature
    Inspect {
        token: String,

        /// Override the validity window (e.g. "24h", "90m")
        #[arg(long)]
        validity: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum SecretCommand {
    /// Generate a random shared secret
    Generate {
        /// Write the secret to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SecretArgs {
    /// Shared secret. Takes precedence over the configuration file.
    #[arg(long, env = "DEVPASS_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// File containing the shared secret
    #[arg(long)]
    secret_file: Option<PathBuf>,
}

impl From<SecretArgs> for SecretOverrides {
    fn from(args: SecretArgs) -> Self {
        SecretOverrides {
            secret: args.secret,
            secret_file: args.secret_file,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.cmd {
        Command::Token { cmd } => match cmd {
            TokenCommand::Issue {
                claim,
                secret,
                validity,
                output,
                quiet,
            } => {
                let config = load_config(cli.config.as_deref(), validity)?;
                commands::token::issue(
                    &config,
                    &secret.into(),
                    &claim,
                    unix_now_seconds(),
                    output.as_deref(),
                    quiet,
                    &mut stdout,
                )?
            }
            TokenCommand::Verify {
                token,
                secret,
                validity,
            } => {
                let config = load_config(cli.config.as_deref(), validity)?;
                commands::token::verify(
                    &config,
                    &secret.into(),
                    &token,
                    unix_now_seconds(),
                    &mut stdout,
                )?
            }
            TokenCommand::Inspect { token, validity } => {
                let config = load_config(cli.config.as_deref(), validity)?;
                commands::token::inspect(&config, &token, unix_now_seconds(), &mut stdout)?
            }
        },

        Command::Secret { cmd } => match cmd {
            SecretCommand::Generate { output } => {
                commands::secret::generate(output.as_deref(), &mut stdout)?
            }
        },
    }

    Ok(())
}
