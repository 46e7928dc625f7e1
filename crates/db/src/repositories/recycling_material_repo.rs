//! Repository for the `recycling_materials` table.

use sqlx::{PgExecutor, PgPool};
use trashmap_core::cleanup::ResolvedMaterials;
use trashmap_core::types::DbId;

use crate::models::recycling_material::RecyclingMaterial;

/// Column list for `recycling_materials` queries.
const COLUMNS: &str = "\
    id, cleanup_task_id, plastic_weight, paper_weight, glass_weight, \
    metal_weight, organic_weight, other_weight, destination_type, created_at";

pub struct RecyclingMaterialRepo;

impl RecyclingMaterialRepo {
    /// Record the material breakdown of a completed task.
    ///
    /// Fails with a `uq_recycling_materials_task` violation if the task
    /// already has a record.
    pub async fn create<'e, E>(
        executor: E,
        cleanup_task_id: DbId,
        materials: &ResolvedMaterials,
    ) -> Result<RecyclingMaterial, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO recycling_materials
                (cleanup_task_id, plastic_weight, paper_weight, glass_weight,
                 metal_weight, organic_weight, other_weight, destination_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecyclingMaterial>(&query)
            .bind(cleanup_task_id)
            .bind(materials.plastic_weight)
            .bind(materials.paper_weight)
            .bind(materials.glass_weight)
            .bind(materials.metal_weight)
            .bind(materials.organic_weight)
            .bind(materials.other_weight)
            .bind(&materials.destination_type)
            .fetch_one(executor)
            .await
    }

    /// Find the material record for a task, if it has been completed.
    pub async fn find_by_task(
        pool: &PgPool,
        cleanup_task_id: DbId,
    ) -> Result<Option<RecyclingMaterial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recycling_materials WHERE cleanup_task_id = $1");
        sqlx::query_as::<_, RecyclingMaterial>(&query)
            .bind(cleanup_task_id)
            .fetch_optional(pool)
            .await
    }
}
