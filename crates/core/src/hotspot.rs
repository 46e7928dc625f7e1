//! Hotspot aggregation over grid cells.

use serde::Serialize;

use crate::grid::{GridCell, GridIndex, ReportSummary};
use crate::types::DbId;

/// A non-empty grid cell annotated with its average severity.
///
/// `latitude`/`longitude` are the cell's rounded key, not raw report
/// coordinates. `report_count` is always at least one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hotspot {
    pub latitude: f64,
    pub longitude: f64,
    pub report_count: i64,
    pub severity_sum: i64,
    pub avg_severity: f64,
    pub reports: Vec<ReportSummary>,
}

impl Hotspot {
    /// Annotate a cell with its mean severity.
    ///
    /// Cells are only materialized by [`GridIndex::build`] when a report
    /// falls into them, so `report_count` is never zero here.
    pub fn from_cell(cell: GridCell) -> Self {
        let avg_severity = cell.severity_sum as f64 / cell.report_count as f64;
        Self {
            latitude: cell.key.latitude(),
            longitude: cell.key.longitude(),
            report_count: cell.report_count,
            severity_sum: cell.severity_sum,
            avg_severity,
            reports: cell.reports,
        }
    }

    /// IDs of the member reports, in insertion order.
    pub fn report_ids(&self) -> Vec<DbId> {
        self.reports.iter().map(|r| r.id).collect()
    }
}

/// Turn every cell of the index into a hotspot. Order is unspecified.
pub fn aggregate(index: GridIndex) -> Vec<Hotspot> {
    index.into_cells().map(Hotspot::from_cell).collect()
}
