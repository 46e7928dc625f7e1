//! Handlers for the `/trucks` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use trashmap_core::error::CoreError;
use trashmap_db::models::status::TruckStatus;
use trashmap_db::models::truck::{CreateTruck, TruckView};
use trashmap_db::repositories::TruckRepo;

use crate::error::AppResult;
use crate::query::StatusFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum truck name length.
const MAX_NAME_LEN: usize = 100;

/// GET /api/v1/trucks
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<StatusFilter>,
) -> AppResult<Json<DataResponse<Vec<TruckView>>>> {
    let status_id = params
        .status
        .as_deref()
        .map(|name| {
            TruckStatus::from_name(name)
                .map(TruckStatus::id)
                .ok_or_else(|| CoreError::Validation(format!("Unknown truck status '{name}'")))
        })
        .transpose()?;
    let trucks = TruckRepo::list(&state.pool, status_id).await?;
    Ok(Json(DataResponse {
        data: trucks.into_iter().map(TruckView::from).collect(),
    }))
}

/// POST /api/v1/trucks
///
/// Registers a truck as available. Duplicate names are a 409.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTruck>,
) -> AppResult<(StatusCode, Json<TruckView>)> {
    let name = input.name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Truck name must be 1 to {MAX_NAME_LEN} characters"
        ))
        .into());
    }

    let truck = TruckRepo::create(
        &state.pool,
        &CreateTruck {
            name: name.to_string(),
        },
    )
    .await?;
    tracing::info!(truck_id = truck.id, name = %truck.name, "Truck registered");
    Ok((StatusCode::CREATED, Json(truck.into())))
}
