pub mod cleanup;
pub mod health;
pub mod hotspots;
pub mod reports;
pub mod trucks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /reports                     list (?limit, offset), submit
/// /reports/batch               submit many (POST)
/// /reports/{id}                get
///
/// /hotspots                    aggregated hotspots (?days, grid_precision)
///
/// /trucks                      list (?status), register
///
/// /cleanup/monitor             run a monitor pass (POST, ?days, grid_precision)
/// /cleanup/tasks               list (?status)
/// /cleanup/tasks/{id}          get, update status (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reports", reports::router())
        .nest("/hotspots", hotspots::router())
        .nest("/trucks", trucks::router())
        .nest("/cleanup", cleanup::router())
}
