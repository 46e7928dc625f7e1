//! Handlers for the `/reports` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use trashmap_core::error::CoreError;
use trashmap_core::paging::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use trashmap_core::report::validate_new_report;
use trashmap_core::types::DbId;
use trashmap_db::models::report::{CreateTrashReport, TrashReport};
use trashmap_db::repositories::ReportRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum number of reports accepted by one batch submission.
const MAX_BATCH_SIZE: usize = 500;

fn validate(input: &CreateTrashReport) -> Result<(), CoreError> {
    validate_new_report(
        input.latitude,
        input.longitude,
        input.severity,
        input.category.as_deref(),
    )
}

/// POST /api/v1/reports
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTrashReport>,
) -> AppResult<(StatusCode, Json<TrashReport>)> {
    validate(&input)?;
    let report = ReportRepo::create(&state.pool, &input).await?;
    tracing::debug!(report_id = report.id, severity = report.severity, "Report submitted");
    Ok((StatusCode::CREATED, Json(report)))
}

/// POST /api/v1/reports/batch
///
/// Accepts a JSON array of reports. Either every report is stored or none.
pub async fn create_batch(
    State(state): State<AppState>,
    Json(inputs): Json<Vec<CreateTrashReport>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<TrashReport>>>)> {
    if inputs.is_empty() {
        return Err(AppError::BadRequest("Batch must contain at least one report".into()));
    }
    if inputs.len() > MAX_BATCH_SIZE {
        return Err(AppError::BadRequest(format!(
            "Batch exceeds {MAX_BATCH_SIZE} reports"
        )));
    }
    for (i, input) in inputs.iter().enumerate() {
        validate(input).map_err(|e| match e {
            CoreError::Validation(msg) => CoreError::Validation(format!("Report {i}: {msg}")),
            other => other,
        })?;
    }

    let reports = ReportRepo::create_many(&state.pool, &inputs).await?;
    tracing::info!(count = reports.len(), "Report batch submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: reports })))
}

/// GET /api/v1/reports
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<TrashReport>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);
    let reports = ReportRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/reports/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TrashReport>> {
    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrashReport",
            id,
        }))?;
    Ok(Json(report))
}
