//! Repository for the `cleanup_tasks` table.
//!
//! Task creation and completion touch several tables (`trucks`,
//! `recycling_materials`, `trash_reports`); those paths run inside a single
//! transaction so a dropped request never leaves a truck assigned without a
//! task, or a completed task without its side effects.

use sqlx::PgPool;
use trashmap_core::cleanup::ResolvedMaterials;
use trashmap_core::types::DbId;

use crate::models::cleanup_task::{
    CleanupTask, CleanupTaskTruckRow, CleanupTaskWithTruck, CompletedTask, CreateCleanupTask,
    TaskInsertOutcome,
};
use crate::models::status::{CleanupTaskStatus, StatusId};
use crate::repositories::{RecyclingMaterialRepo, ReportRepo, TruckRepo};

/// Column list for `cleanup_tasks` queries.
const COLUMNS: &str = "\
    id, latitude, longitude, truck_id, report_count, avg_severity, \
    status_id, report_ids, created_at, updated_at";

/// Column list for joined queries, with `cleanup_tasks` aliased as `t`.
const JOINED_COLUMNS: &str = "\
    t.id, t.latitude, t.longitude, t.truck_id, t.report_count, t.avg_severity, \
    t.status_id, t.report_ids, t.created_at, t.updated_at, \
    s.name AS status, \
    tr.name AS truck_name, tr.status_id AS truck_status_id, \
    tr.created_at AS truck_created_at, tr.updated_at AS truck_updated_at";

fn active_status_ids() -> Vec<StatusId> {
    CleanupTaskStatus::ACTIVE.iter().map(|s| s.id()).collect()
}

/// Provides lifecycle operations for cleanup tasks.
pub struct CleanupTaskRepo;

impl CleanupTaskRepo {
    // ── Queries ──────────────────────────────────────────────────────────

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CleanupTask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cleanup_tasks WHERE id = $1");
        sqlx::query_as::<_, CleanupTask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the active (assigned or in-progress) task at a grid cell, if any.
    pub async fn find_active_at(
        pool: &PgPool,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<CleanupTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cleanup_tasks \
             WHERE latitude = $1 AND longitude = $2 AND status_id = ANY($3) \
             LIMIT 1"
        );
        sqlx::query_as::<_, CleanupTask>(&query)
            .bind(latitude)
            .bind(longitude)
            .bind(active_status_ids())
            .fetch_optional(pool)
            .await
    }

    /// List tasks with their status name and bound truck, newest first.
    pub async fn list_with_trucks(
        pool: &PgPool,
        status_id: Option<StatusId>,
    ) -> Result<Vec<CleanupTaskWithTruck>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM cleanup_tasks t \
             JOIN cleanup_task_statuses s ON s.id = t.status_id \
             LEFT JOIN trucks tr ON tr.id = t.truck_id \
             WHERE ($1::SMALLINT IS NULL OR t.status_id = $1) \
             ORDER BY t.created_at DESC, t.id DESC"
        );
        let rows = sqlx::query_as::<_, CleanupTaskTruckRow>(&query)
            .bind(status_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CleanupTaskWithTruck::from).collect())
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Claim an available truck and create an assigned task for a hotspot.
    ///
    /// Both writes share one transaction. If no truck can be claimed, or the
    /// cell already has an active task (`uq_cleanup_tasks_active_cell`), the
    /// transaction is rolled back and nothing changes.
    pub async fn create_with_truck(
        pool: &PgPool,
        input: &CreateCleanupTask,
    ) -> Result<TaskInsertOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(truck) = TruckRepo::claim_available(&mut *tx).await? else {
            tracing::debug!(
                latitude = input.latitude,
                longitude = input.longitude,
                "No available truck to claim",
            );
            tx.rollback().await?;
            return Ok(TaskInsertOutcome::NoTruckAvailable);
        };

        let query = format!(
            "INSERT INTO cleanup_tasks
                (latitude, longitude, truck_id, report_count, avg_severity, status_id, report_ids)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (latitude, longitude) WHERE status_id IN (1, 2) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, CleanupTask>(&query)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(truck.id)
            .bind(input.report_count)
            .bind(input.avg_severity)
            .bind(CleanupTaskStatus::Assigned.id())
            .bind(&input.report_ids)
            .fetch_optional(&mut *tx)
            .await?;

        match task {
            Some(task) => {
                tx.commit().await?;
                Ok(TaskInsertOutcome::Created { task, truck })
            }
            None => {
                tracing::debug!(
                    truck_id = truck.id,
                    latitude = input.latitude,
                    longitude = input.longitude,
                    "Cell already has an active task, releasing truck claim",
                );
                tx.rollback().await?;
                Ok(TaskInsertOutcome::CellOccupied)
            }
        }
    }

    /// Set a task's status without any side effects.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<CleanupTask>, sqlx::Error> {
        let query = format!(
            "UPDATE cleanup_tasks SET status_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CleanupTask>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Complete a task and apply its side effects in one transaction:
    /// mark it completed, release its truck, record the material breakdown,
    /// and resolve its member reports.
    ///
    /// Returns `None` if the task does not exist.
    pub async fn complete_with_materials(
        pool: &PgPool,
        id: DbId,
        materials: &ResolvedMaterials,
    ) -> Result<Option<CompletedTask>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE cleanup_tasks SET status_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let Some(task) = sqlx::query_as::<_, CleanupTask>(&query)
            .bind(id)
            .bind(CleanupTaskStatus::Completed.id())
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let released_truck_id = match task.truck_id {
            Some(truck_id) => {
                TruckRepo::release(&mut *tx, truck_id).await?;
                Some(truck_id)
            }
            None => None,
        };

        let material = RecyclingMaterialRepo::create(&mut *tx, task.id, materials).await?;
        let resolved_reports = ReportRepo::mark_resolved(&mut *tx, &task.report_ids).await?;

        tx.commit().await?;

        Ok(Some(CompletedTask {
            task,
            material,
            released_truck_id,
            resolved_reports,
        }))
    }
}
