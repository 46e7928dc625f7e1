//! Recycling material entity model.

use serde::Serialize;
use sqlx::FromRow;
use trashmap_core::types::{DbId, Timestamp};

/// Unique constraint allowing one material record per task.
pub const TASK_MATERIAL_CONSTRAINT: &str = "uq_recycling_materials_task";

/// A row from the `recycling_materials` table. One per completed task.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecyclingMaterial {
    pub id: DbId,
    pub cleanup_task_id: DbId,
    pub plastic_weight: f64,
    pub paper_weight: f64,
    pub glass_weight: f64,
    pub metal_weight: f64,
    pub organic_weight: f64,
    pub other_weight: f64,
    pub destination_type: String,
    pub created_at: Timestamp,
}
