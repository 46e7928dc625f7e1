//! Repository for the `trucks` table.

use sqlx::{PgExecutor, PgPool};
use trashmap_core::types::DbId;

use crate::models::status::{StatusId, TruckStatus};
use crate::models::truck::{CreateTruck, Truck};

/// Column list for `trucks` queries.
const COLUMNS: &str = "id, name, status_id, created_at, updated_at";

/// Provides CRUD and assignment operations for trucks.
pub struct TruckRepo;

impl TruckRepo {
    /// Register a new truck in the available state.
    pub async fn create(pool: &PgPool, input: &CreateTruck) -> Result<Truck, sqlx::Error> {
        let query = format!(
            "INSERT INTO trucks (name, status_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Truck>(&query)
            .bind(&input.name)
            .bind(TruckStatus::Available.id())
            .fetch_one(pool)
            .await
    }

    /// Find a truck by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Truck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trucks WHERE id = $1");
        sqlx::query_as::<_, Truck>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List trucks ordered by ID, optionally filtered by status.
    pub async fn list(pool: &PgPool, status_id: Option<StatusId>) -> Result<Vec<Truck>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trucks \
             WHERE ($1::SMALLINT IS NULL OR status_id = $1) \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Truck>(&query)
            .bind(status_id)
            .fetch_all(pool)
            .await
    }

    /// Atomically claim one available truck, marking it assigned.
    ///
    /// Uses `SELECT FOR UPDATE SKIP LOCKED` so concurrent monitor passes
    /// never claim the same truck. Returns `None` when the fleet is busy.
    pub async fn claim_available<'e, E>(executor: E) -> Result<Option<Truck>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE trucks SET status_id = $1 \
             WHERE id = ( \
                 SELECT id FROM trucks \
                 WHERE status_id = $2 \
                 ORDER BY id ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Truck>(&query)
            .bind(TruckStatus::Assigned.id())
            .bind(TruckStatus::Available.id())
            .fetch_optional(executor)
            .await
    }

    /// Return a truck to the available pool. Returns rows affected.
    pub async fn release<'e, E>(executor: E, id: DbId) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE trucks SET status_id = $2 WHERE id = $1")
            .bind(id)
            .bind(TruckStatus::Available.id())
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
