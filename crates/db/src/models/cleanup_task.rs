//! Cleanup task entity models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use trashmap_core::types::{DbId, Timestamp};

use crate::models::recycling_material::RecyclingMaterial;
use crate::models::report::TrashReport;
use crate::models::status::{CleanupTaskStatus, StatusId};
use crate::models::truck::{Truck, TruckView};

/// Partial unique index that allows one active task per grid cell.
pub const ACTIVE_CELL_CONSTRAINT: &str = "uq_cleanup_tasks_active_cell";

// ---------------------------------------------------------------------------
// Entity structs (match database tables)
// ---------------------------------------------------------------------------

/// A row from the `cleanup_tasks` table.
///
/// `latitude`/`longitude` hold the hotspot's grid key. `report_count`,
/// `avg_severity` and `report_ids` are a snapshot taken at creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CleanupTask {
    pub id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub truck_id: Option<DbId>,
    pub report_count: i64,
    pub avg_severity: f64,
    pub status_id: StatusId,
    pub report_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CleanupTask {
    /// Lifecycle status, or `None` for an id outside the lookup table.
    pub fn status(&self) -> Option<CleanupTaskStatus> {
        CleanupTaskStatus::from_id(self.status_id)
    }
}

/// Wire view of a task: the row plus its status name.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupTaskView {
    #[serde(flatten)]
    pub task: CleanupTask,
    pub status: &'static str,
}

impl From<CleanupTask> for CleanupTaskView {
    fn from(task: CleanupTask) -> Self {
        let status = task.status().map_or("UNKNOWN", CleanupTaskStatus::name);
        Self { task, status }
    }
}

/// A task with everything it refers to: truck, material record, and the
/// reports it was created from.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupTaskDetail {
    #[serde(flatten)]
    pub task: CleanupTaskView,
    pub truck: Option<TruckView>,
    pub material: Option<RecyclingMaterial>,
    pub reports: Vec<TrashReport>,
}

/// A cleanup task joined with its status name and bound truck.
#[derive(Debug, Clone, FromRow)]
pub struct CleanupTaskTruckRow {
    #[sqlx(flatten)]
    pub task: CleanupTask,
    pub status: String,
    pub truck_name: Option<String>,
    pub truck_status_id: Option<StatusId>,
    pub truck_created_at: Option<Timestamp>,
    pub truck_updated_at: Option<Timestamp>,
}

/// List view of a cleanup task with truck details.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupTaskWithTruck {
    #[serde(flatten)]
    pub task: CleanupTask,
    pub status: String,
    pub truck: Option<TruckView>,
}

impl From<CleanupTaskTruckRow> for CleanupTaskWithTruck {
    fn from(row: CleanupTaskTruckRow) -> Self {
        let truck = match (
            row.task.truck_id,
            row.truck_name,
            row.truck_status_id,
            row.truck_created_at,
            row.truck_updated_at,
        ) {
            (Some(id), Some(name), Some(status_id), Some(created_at), Some(updated_at)) => {
                Some(TruckView::from(Truck {
                    id,
                    name,
                    status_id,
                    created_at,
                    updated_at,
                }))
            }
            _ => None,
        };
        Self {
            task: row.task,
            status: row.status,
            truck,
        }
    }
}

// ---------------------------------------------------------------------------
// Create DTOs
// ---------------------------------------------------------------------------

/// Snapshot of a critical hotspot used to create a task.
#[derive(Debug, Clone)]
pub struct CreateCleanupTask {
    pub latitude: f64,
    pub longitude: f64,
    pub report_count: i64,
    pub avg_severity: f64,
    pub report_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of trying to create a task for a hotspot.
#[derive(Debug, Clone)]
pub enum TaskInsertOutcome {
    /// A truck was claimed and the task row written.
    Created { task: CleanupTask, truck: Truck },
    /// No truck was available; nothing was written.
    NoTruckAvailable,
    /// Another active task already holds the cell; nothing was written.
    CellOccupied,
}

/// Everything written when a task is completed with material data.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedTask {
    pub task: CleanupTask,
    pub material: RecyclingMaterial,
    pub released_truck_id: Option<DbId>,
    pub resolved_reports: u64,
}
