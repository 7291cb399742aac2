//! Error types for building the authorization state.

use devpass_core::ConfigError;
use devpass_token::TokenError;
use thiserror::Error;

/// Errors raised while wiring the middleware from configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Token(#[from] TokenError),
}
