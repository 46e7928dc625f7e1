//! Spatial grid indexing of geotagged reports.
//!
//! Reports are bucketed by rounding latitude and longitude independently to
//! a fixed number of decimal places. Rounding is half-away-from-zero
//! ([`f64::round`]) applied to `value * 10^precision`, and cells are keyed
//! by the resulting integer indices so that key equality is exact.
//!
//! At the default precision of 4 decimal places a cell is roughly 11m
//! across at the equator.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::report::{Category, ReportPoint};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default number of decimal places used for grid rounding.
pub const DEFAULT_GRID_PRECISION: u32 = 4;

/// Largest precision accepted from callers. Beyond this the cells are
/// smaller than typical GPS error and every report becomes its own cell.
pub const MAX_GRID_PRECISION: u32 = 10;

/// Default lookback window, in days, for hotspot detection.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Largest lookback window accepted from callers.
pub const MAX_LOOKBACK_DAYS: u32 = 3650;

// ---------------------------------------------------------------------------
// Grid keys
// ---------------------------------------------------------------------------

fn scale(precision: u32) -> f64 {
    10f64.powi(precision as i32)
}

/// Cell index of a coordinate: `value × 10^precision`, rounded half away
/// from zero.
fn grid_index(value: f64, precision: u32) -> i64 {
    (value * scale(precision)).round() as i64
}

/// Identity of a grid cell: the rounded coordinates at a given precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridKey {
    lat_idx: i64,
    lng_idx: i64,
    precision: u32,
}

impl GridKey {
    /// Compute the cell a point falls into.
    pub fn from_point(latitude: f64, longitude: f64, precision: u32) -> Self {
        Self {
            lat_idx: grid_index(latitude, precision),
            lng_idx: grid_index(longitude, precision),
            precision,
        }
    }

    /// Rounded latitude of the cell.
    pub fn latitude(&self) -> f64 {
        self.lat_idx as f64 / scale(self.precision)
    }

    /// Rounded longitude of the cell.
    pub fn longitude(&self) -> f64 {
        self.lng_idx as f64 / scale(self.precision)
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// Per-report summary carried by a cell for downstream task linkage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub id: DbId,
    pub category: Category,
    pub severity: i16,
    pub captured_at: Timestamp,
}

impl From<&ReportPoint> for ReportSummary {
    fn from(report: &ReportPoint) -> Self {
        Self {
            id: report.id,
            category: Category::from_label(report.category.as_deref()),
            severity: report.severity,
            captured_at: report.captured_at,
        }
    }
}

/// A non-empty bucket of reports sharing the same rounded coordinates.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub key: GridKey,
    pub report_count: i64,
    pub severity_sum: i64,
    pub reports: Vec<ReportSummary>,
}

impl GridCell {
    fn new(key: GridKey) -> Self {
        Self {
            key,
            report_count: 0,
            severity_sum: 0,
            reports: Vec::new(),
        }
    }

    fn push(&mut self, report: &ReportPoint) {
        self.report_count += 1;
        self.severity_sum += i64::from(report.severity);
        self.reports.push(ReportSummary::from(report));
    }
}

/// Reports partitioned into grid cells at a single precision.
///
/// Built from scratch for every query; cells only exist for coordinates
/// that at least one report rounds to.
#[derive(Debug, Clone)]
pub struct GridIndex {
    precision: u32,
    cells: HashMap<GridKey, GridCell>,
}

impl GridIndex {
    /// Partition `reports` into cells at `precision` decimal places.
    pub fn build<'a, I>(reports: I, precision: u32) -> Self
    where
        I: IntoIterator<Item = &'a ReportPoint>,
    {
        let mut cells: HashMap<GridKey, GridCell> = HashMap::new();
        for report in reports {
            let key = GridKey::from_point(report.latitude, report.longitude, precision);
            cells
                .entry(key)
                .or_insert_with(|| GridCell::new(key))
                .push(report);
        }
        Self { precision, cells }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.values()
    }

    pub fn into_cells(self) -> impl Iterator<Item = GridCell> {
        self.cells.into_values()
    }
}

// ---------------------------------------------------------------------------
// Window and precision helpers
// ---------------------------------------------------------------------------

/// Earliest capture time included in a window of `lookback_days` ending at `now`.
pub fn window_start(now: Timestamp, lookback_days: u32) -> Timestamp {
    now - chrono::Duration::days(i64::from(lookback_days))
}

/// Validate a caller-supplied grid precision.
pub fn validate_precision(precision: u32) -> Result<(), CoreError> {
    if !(1..=MAX_GRID_PRECISION).contains(&precision) {
        return Err(CoreError::Validation(format!(
            "grid_precision must be between 1 and {MAX_GRID_PRECISION}, got {precision}"
        )));
    }
    Ok(())
}

/// Validate a caller-supplied lookback window.
pub fn validate_lookback_days(days: u32) -> Result<(), CoreError> {
    if !(1..=MAX_LOOKBACK_DAYS).contains(&days) {
        return Err(CoreError::Validation(format!(
            "days must be between 1 and {MAX_LOOKBACK_DAYS}, got {days}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
