//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Hotspot window parameters (`?days=&grid_precision=`).
///
/// Missing values fall back to the configured monitor defaults.
#[derive(Debug, Default, Deserialize)]
pub struct HotspotParams {
    pub days: Option<u32>,
    pub grid_precision: Option<u32>,
}

/// Optional wire-name status filter (`?status=`).
#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}
