use anyhow::anyhow;
use axum::{
    extract::{Path, Request, State, rejection::PathRejection},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use vape_auth::Caller;
use vape_core::AppError;
use vape_models::User;

use crate::modules::users::service::UserService;
use crate::state::AppState;

/// Output of [`authorize`]: the caller is allowed to act on user `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizedTarget {
    pub caller: Caller,
    /// Parsed path id. Zero is never a valid user.
    pub id: i64,
}

/// Output of [`fetch_user`]: an authorized target whose record was loaded.
///
/// Only [`fetch_user`] builds this, so a handler holding a `UserContext`
/// knows both stages succeeded.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub target: AuthorizedTarget,
    pub user: User,
}

impl UserContext {
    pub fn id(&self) -> i64 {
        self.target.id
    }

    pub fn caller(&self) -> Caller {
        self.target.caller
    }
}

/// Self-or-admin: a caller may act on their own record, and an admin on any.
pub fn is_permitted(caller: &Caller, id: i64) -> bool {
    (id != 0 && caller.id == id) || caller.admin
}

/// A missing caller is reported before an unparsable or undecodable id.
pub async fn authorize(
    path: Result<Path<String>, PathRejection>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = req
        .extensions()
        .get::<Caller>()
        .copied()
        .ok_or_else(|| AppError::unauthorized(anyhow!("unauthorized")))?;

    let Path(raw_id) = path.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Rejected undecodable user id");
        AppError::bad_request(anyhow!("invalid user id"))
    })?;

    let id = raw_id.parse::<i64>().map_err(|e| {
        debug!(raw_id = %raw_id, error = %e, "Rejected unparsable user id");
        AppError::bad_request(anyhow!("invalid user id"))
    })?;

    if !is_permitted(&caller, id) {
        warn!(caller_id = caller.id, target_id = id, "Caller may not act on user");
        return Err(AppError::unauthorized(anyhow!("unauthorized")));
    }

    req.extensions_mut().insert(AuthorizedTarget { caller, id });
    Ok(next.run(req).await)
}

pub async fn fetch_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let target = req
        .extensions_mut()
        .remove::<AuthorizedTarget>()
        .filter(|target| target.id != 0)
        .ok_or_else(|| AppError::bad_request(anyhow!("invalid user id")))?;

    let user = UserService::get_user(state.directory.as_ref(), target.id).await?;

    req.extensions_mut().insert(UserContext { target, user });
    Ok(next.run(req).await)
}
