//! # devpass-server
//!
//! HTTP authorization adapter for development admin tokens.
//!
//! Host applications wrap their admin routes with [`require_dev_admin`]:
//!
//! ```no_run
//! use axum::{Extension, Router, middleware, routing::get};
//! use devpass_core::DevPassConfig;
//! use devpass_server::{DevAdmin, DevAuthState, require_dev_admin};
//! use std::sync::Arc;
//!
//! async fn whoami(Extension(admin): Extension<DevAdmin>) -> String {
//!     admin.email
//! }
//!
//! # fn build() -> Result<Router, Box<dyn std::error::Error>> {
//! let config = DevPassConfig::from_file("devpass.yaml")?;
//! let state = Arc::new(DevAuthState::from_config(&config)?);
//! let app = Router::new()
//!     .route("/admin/whoami", get(whoami))
//!     .layer(middleware::from_fn_with_state(state, require_dev_admin));
//! # Ok(app)
//! # }
//! ```
//!
//! Every rejection is the same bare `401`, whatever check failed.

pub mod error;
pub mod middleware;
pub mod state;

pub use error::SetupError;
pub use middleware::auth::{DevAdmin, require_dev_admin};
pub use state::{AdminAllowList, DevAuthState};
