//! Route definitions for the `/cleanup` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::cleanup;
use crate::state::AppState;

/// Routes mounted at `/cleanup`.
///
/// ```text
/// POST   /monitor       -> run_monitor   (?days, grid_precision)
/// GET    /tasks         -> list_tasks    (?status)
/// GET    /tasks/{id}    -> get_task
/// PATCH  /tasks/{id}    -> update_task_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/monitor", post(cleanup::run_monitor))
        .route("/tasks", get(cleanup::list_tasks))
        .route(
            "/tasks/{id}",
            get(cleanup::get_task).patch(cleanup::update_task_status),
        )
}
