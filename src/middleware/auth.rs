use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use vape_auth::{Caller, verify_token};

use crate::state::AppState;

/// Attaches the [`Caller`] to the request when a valid bearer token is
/// present.
///
/// Never rejects: a missing or invalid token leaves the request without a
/// caller, and the routes that need one answer 401 themselves.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        match verify_token(token, &state.jwt_config).and_then(|claims| Caller::try_from(&claims)) {
            Ok(caller) => {
                req.extensions_mut().insert(caller);
            }
            Err(e) => {
                debug!(error = %e.error, "Ignoring invalid bearer token");
            }
        }
    }

    next.run(req).await
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
