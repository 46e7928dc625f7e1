//! Handlers for the `/cleanup` resource: monitor passes, tasks and task status.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use trashmap_core::cleanup::MaterialBreakdown;
use trashmap_core::error::CoreError;
use trashmap_core::types::DbId;
use trashmap_db::models::cleanup_task::{CleanupTaskDetail, CleanupTaskWithTruck};
use trashmap_db::models::status::CleanupTaskStatus;
use trashmap_db::repositories::{CleanupTaskRepo, RecyclingMaterialRepo, ReportRepo, TruckRepo};
use trashmap_pipeline::completion::{self, StatusChange, StatusUpdate};
use trashmap_pipeline::monitor::{self, MonitorSummary};

use crate::error::{AppError, AppResult};
use crate::query::{HotspotParams, StatusFilter};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PATCH /cleanup/tasks/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: Option<String>,
    pub material_data: Option<MaterialBreakdown>,
}

/// POST /api/v1/cleanup/monitor
///
/// Run one monitor pass now. Window parameters default to the configured
/// monitor settings.
pub async fn run_monitor(
    State(state): State<AppState>,
    Query(params): Query<HotspotParams>,
) -> AppResult<Json<MonitorSummary>> {
    let settings = state
        .config
        .monitor
        .settings(params.days, params.grid_precision);
    let summary = monitor::run_monitor_pass(&state.pool, &settings).await?;
    Ok(Json(summary))
}

/// GET /api/v1/cleanup/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<StatusFilter>,
) -> AppResult<Json<DataResponse<Vec<CleanupTaskWithTruck>>>> {
    let status_id = params
        .status
        .as_deref()
        .map(|name| {
            CleanupTaskStatus::from_name(name)
                .map(CleanupTaskStatus::id)
                .ok_or_else(|| {
                    CoreError::Validation(format!("Unknown cleanup task status '{name}'"))
                })
        })
        .transpose()?;
    let tasks = CleanupTaskRepo::list_with_trucks(&state.pool, status_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/cleanup/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CleanupTaskDetail>>> {
    let task = CleanupTaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "CleanupTask",
            id,
        })?;

    let truck = match task.truck_id {
        Some(truck_id) => TruckRepo::find_by_id(&state.pool, truck_id).await?,
        None => None,
    };
    let material = RecyclingMaterialRepo::find_by_task(&state.pool, id).await?;
    let reports = ReportRepo::find_by_ids(&state.pool, &task.report_ids).await?;

    Ok(Json(DataResponse {
        data: CleanupTaskDetail {
            task: task.into(),
            truck: truck.map(Into::into),
            material,
            reports,
        },
    }))
}

/// PATCH /api/v1/cleanup/tasks/{id}
///
/// Set a task's status. `COMPLETED` with `material_data` also releases the
/// truck, records the materials and resolves the member reports.
pub async fn update_task_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskStatusRequest>,
) -> AppResult<Json<StatusUpdate>> {
    let status = input
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Status is required".into()))?;

    let change = StatusChange::parse(status, input.material_data)?;
    let update =
        completion::update_task_status(&state.pool, id, change, state.config.require_materials)
            .await?;
    Ok(Json(update))
}
