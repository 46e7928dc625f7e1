//! Route definitions for the `/reports` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /          -> list     (?limit, offset)
/// POST   /          -> create
/// POST   /batch     -> create_batch
/// GET    /{id}      -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list).post(reports::create))
        .route("/batch", post(reports::create_batch))
        .route("/{id}", get(reports::get_by_id))
}
