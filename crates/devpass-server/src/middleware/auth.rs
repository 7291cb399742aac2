use crate::state::DevAuthState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// The authenticated admin, inserted into request extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DevAdmin {
    pub email: String,
    pub issued_at: u64,
    pub expires_at: u64,
}

/// Axum middleware admitting requests that carry a valid development token
/// for an allow-listed admin:
/// - extract `Authorization: Bearer <token>`
/// - verify signature, scheme tag and freshness
/// - check the claim against the admin allow-list
///
/// All failures produce the same `401` so callers cannot tell a garbage
/// token from a nearly valid one.
pub async fn require_dev_admin(
    State(state): State<Arc<DevAuthState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer(req.headers()) else {
        tracing::debug!("Request without bearer token");
        return unauthorized();
    };

    // The verifier logs the specific rejection reason
    let Ok(verified) = state.verifier().verify(token, unix_now_seconds()) else {
        return unauthorized();
    };

    if !state.admins().contains(&verified.claim) {
        tracing::warn!(claim = %verified.claim, "Development token for a non-admin identity");
        return unauthorized();
    }

    tracing::debug!(claim = %verified.claim, "Development admin authenticated");
    req.extensions_mut().insert(DevAdmin {
        email: verified.claim,
        issued_at: verified.issued_at,
        expires_at: verified.expires_at,
    });

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, [(header::WWW_AUTHENTICATE, "Bearer")]).into_response()
}

fn unix_now_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
