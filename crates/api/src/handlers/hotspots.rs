//! Handlers for the `/hotspots` resource.

use axum::extract::{Query, State};
use axum::Json;
use trashmap_core::hotspot::Hotspot;
use trashmap_pipeline::hotspots::load_hotspots;

use crate::error::AppResult;
use crate::query::HotspotParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/hotspots
///
/// Aggregated hotspots over the requested window, densest first. Read-only:
/// no escalation and no task creation.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HotspotParams>,
) -> AppResult<Json<DataResponse<Vec<Hotspot>>>> {
    let settings = state
        .config
        .monitor
        .settings(params.days, params.grid_precision);
    settings.validate()?;

    let mut hotspots =
        load_hotspots(&state.pool, settings.lookback_days, settings.grid_precision).await?;
    hotspots.sort_by(|a, b| b.report_count.cmp(&a.report_count));
    Ok(Json(DataResponse { data: hotspots }))
}
