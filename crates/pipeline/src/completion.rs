//! Task status transitions.
//!
//! Any status may be written to a task. Only a transition to `COMPLETED`
//! that carries a material breakdown triggers the completion side effects
//! (truck release, material record, report resolution). A bare `COMPLETED`
//! changes the status alone, unless the caller requires material data.
//!
//! The task must exist before the request body is judged: an unknown id is
//! not-found even when the status change itself would be rejected.

use serde::Serialize;
use sqlx::PgPool;
use trashmap_core::cleanup::{self, MaterialBreakdown};
use trashmap_core::error::CoreError;
use trashmap_core::types::DbId;
use trashmap_db::models::cleanup_task::{CleanupTaskView, ACTIVE_CELL_CONSTRAINT};
use trashmap_db::models::recycling_material::{RecyclingMaterial, TASK_MATERIAL_CONSTRAINT};
use trashmap_db::models::status::CleanupTaskStatus;
use trashmap_db::repositories::CleanupTaskRepo;

use crate::error::{PipelineError, PipelineResult};

/// A requested status change.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: CleanupTaskStatus,
    pub material: Option<MaterialBreakdown>,
}

impl StatusChange {
    /// Parse a wire status name (`ASSIGNED`, `IN_PROGRESS`, `COMPLETED`).
    pub fn parse(status: &str, material: Option<MaterialBreakdown>) -> Result<Self, CoreError> {
        let status = CleanupTaskStatus::from_name(status).ok_or_else(|| {
            CoreError::Validation(format!("Unknown cleanup task status '{status}'"))
        })?;
        Ok(Self { status, material })
    }
}

/// Result of a status change.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub success: bool,
    pub task: CleanupTaskView,
    pub message: String,
    /// Material record written by a completion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<RecyclingMaterial>,
}

/// Apply `change` to task `id`.
///
/// With `require_material` set, `COMPLETED` without a breakdown is a
/// validation error and nothing is written.
pub async fn update_task_status(
    pool: &PgPool,
    id: DbId,
    change: StatusChange,
    require_material: bool,
) -> PipelineResult<StatusUpdate> {
    let StatusChange { status, material } = change;
    let completing = status == CleanupTaskStatus::Completed;

    CleanupTaskRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "CleanupTask",
            id,
        })?;

    if completing && material.is_none() && require_material {
        return Err(CoreError::Validation(
            "Material data is required to complete a cleanup task".to_string(),
        )
        .into());
    }

    let (task, material) = match material.filter(|_| completing) {
        Some(breakdown) => {
            let resolved = breakdown.resolve()?;
            let completed = CleanupTaskRepo::complete_with_materials(pool, id, &resolved)
                .await
                .map_err(|e| constraint_conflict(e, id, status))?
                .ok_or(CoreError::NotFound {
                    entity: "CleanupTask",
                    id,
                })?;
            tracing::info!(
                task_id = id,
                truck_id = completed.released_truck_id,
                resolved_reports = completed.resolved_reports,
                total_weight = resolved.total_weight(),
                "Cleanup task completed",
            );
            (completed.task, Some(completed.material))
        }
        None => {
            let task = CleanupTaskRepo::update_status(pool, id, status.id())
                .await
                .map_err(|e| constraint_conflict(e, id, status))?
                .ok_or(CoreError::NotFound {
                    entity: "CleanupTask",
                    id,
                })?;
            if completing {
                tracing::warn!(
                    task_id = id,
                    truck_id = task.truck_id,
                    "Cleanup task completed without material data; truck stays assigned",
                );
            } else {
                tracing::info!(task_id = id, status = %status, "Cleanup task status updated");
            }
            (task, None)
        }
    };

    Ok(StatusUpdate {
        success: true,
        task: task.into(),
        message: cleanup::status_message(status.name()),
        material,
    })
}

/// Map the unique-constraint violations a status write can hit to a
/// conflict naming the task. Other database errors pass through.
fn constraint_conflict(err: sqlx::Error, id: DbId, status: CleanupTaskStatus) -> PipelineError {
    let constraint = match &err {
        sqlx::Error::Database(db) => db.constraint().map(str::to_owned),
        _ => None,
    };
    match constraint.as_deref() {
        Some(ACTIVE_CELL_CONSTRAINT) if status.is_active() => {
            tracing::warn!(task_id = id, status = %status, "Cell already has an active cleanup task");
            CoreError::Conflict(format!(
                "Cleanup task {id} cannot be set to {status}: its cell already has an active task"
            ))
            .into()
        }
        Some(TASK_MATERIAL_CONSTRAINT) => CoreError::Conflict(format!(
            "Cleanup task {id} already has a material record"
        ))
        .into(),
        _ => err.into(),
    }
}
