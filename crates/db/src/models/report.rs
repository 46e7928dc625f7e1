//! Trash report entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trashmap_core::report::ReportPoint;
use trashmap_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (match database tables)
// ---------------------------------------------------------------------------

/// A row from the `trash_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrashReport {
    pub id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<String>,
    pub severity: i16,
    pub captured_at: Timestamp,
    pub reporter_id: Option<String>,
    pub classification: Option<serde_json::Value>,
    pub resolved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The columns the hotspot pipeline reads from `trash_reports`.
#[derive(Debug, Clone, FromRow)]
pub struct ReportPointRow {
    pub id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<String>,
    pub severity: i16,
    pub captured_at: Timestamp,
}

impl From<ReportPointRow> for ReportPoint {
    fn from(row: ReportPointRow) -> Self {
        ReportPoint {
            id: row.id,
            latitude: row.latitude,
            longitude: row.longitude,
            category: row.category,
            severity: row.severity,
            captured_at: row.captured_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Create DTOs
// ---------------------------------------------------------------------------

/// DTO for submitting a new report. `captured_at` defaults to now.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrashReport {
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<String>,
    pub severity: i16,
    pub captured_at: Option<Timestamp>,
    pub reporter_id: Option<String>,
    pub classification: Option<serde_json::Value>,
}
