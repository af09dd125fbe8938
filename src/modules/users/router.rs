use axum::{Router, middleware, routing::get};

use crate::middleware::user::{authorize, fetch_user};
use crate::modules::users::controller::{delete_user, get_user, update_user};
use crate::state::AppState;

/// Routes under `/users`.
///
/// Layers run outermost-first, so every request is authorized before the
/// target user is fetched, and fetched before any handler runs.
pub fn init_users_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state, fetch_user))
        .route_layer(middleware::from_fn(authorize))
}
