//! Truck entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trashmap_core::types::{DbId, Timestamp};

use crate::models::status::{StatusId, TruckStatus};

/// A row from the `trucks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Truck {
    pub id: DbId,
    pub name: String,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Wire view of a truck: the row plus its status name.
#[derive(Debug, Clone, Serialize)]
pub struct TruckView {
    #[serde(flatten)]
    pub truck: Truck,
    pub status: &'static str,
}

impl From<Truck> for TruckView {
    fn from(truck: Truck) -> Self {
        let status = TruckStatus::from_id(truck.status_id).map_or("UNKNOWN", TruckStatus::name);
        Self { truck, status }
    }
}

/// DTO for registering a truck. New trucks start out available.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTruck {
    pub name: String,
}
