//! Hotspot computation from the report store.

use chrono::Utc;
use sqlx::PgPool;
use trashmap_core::grid::{self, GridIndex};
use trashmap_core::hotspot::{self, Hotspot};
use trashmap_db::repositories::ReportRepo;

use crate::error::PipelineResult;

/// Aggregate every report captured in the last `lookback_days` into
/// hotspots at `grid_precision` decimal places.
///
/// Read-only. Callers validate the window and precision.
pub async fn load_hotspots(
    pool: &PgPool,
    lookback_days: u32,
    grid_precision: u32,
) -> PipelineResult<Vec<Hotspot>> {
    let cutoff = grid::window_start(Utc::now(), lookback_days);
    let reports = ReportRepo::list_points_since(pool, cutoff).await?;

    let index = GridIndex::build(&reports, grid_precision);
    tracing::debug!(
        reports = reports.len(),
        cells = index.len(),
        lookback_days,
        grid_precision,
        "Reports indexed into grid cells",
    );

    Ok(hotspot::aggregate(index))
}
