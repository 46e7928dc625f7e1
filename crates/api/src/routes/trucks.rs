//! Route definitions for the `/trucks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::trucks;
use crate::state::AppState;

/// Routes mounted at `/trucks`.
///
/// ```text
/// GET    /          -> list     (?status)
/// POST   /          -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(trucks::list).post(trucks::create))
}
