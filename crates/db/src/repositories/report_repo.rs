//! Repository for the `trash_reports` table.

use sqlx::{PgExecutor, PgPool};
use trashmap_core::report::ReportPoint;
use trashmap_core::types::{DbId, Timestamp};

use crate::models::report::{CreateTrashReport, ReportPointRow, TrashReport};

/// Column list for `trash_reports` queries.
const COLUMNS: &str = "\
    id, latitude, longitude, category, severity, captured_at, reporter_id, \
    classification, resolved, created_at, updated_at";

/// Provides CRUD operations for trash reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new report, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateTrashReport) -> Result<TrashReport, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO trash_reports
                (latitude, longitude, category, severity, captured_at, reporter_id, classification)
             VALUES ($1, $2, $3, $4, COALESCE($5, NOW()), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrashReport>(&query)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.category)
            .bind(input.severity)
            .bind(input.captured_at)
            .bind(&input.reporter_id)
            .bind(&input.classification)
            .fetch_one(executor)
            .await
    }

    /// Insert many reports in a single transaction.
    pub async fn create_many(
        pool: &PgPool,
        inputs: &[CreateTrashReport],
    ) -> Result<Vec<TrashReport>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(Self::create(&mut *tx, input).await?);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// Find a report by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TrashReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trash_reports WHERE id = $1");
        sqlx::query_as::<_, TrashReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find all reports whose ID is in `ids`, ordered by ID.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<TrashReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM trash_reports WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, TrashReport>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List reports, most recently captured first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TrashReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trash_reports \
             ORDER BY captured_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, TrashReport>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Fetch the pipeline projection of every report captured at or after `cutoff`.
    pub async fn list_points_since(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<Vec<ReportPoint>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ReportPointRow>(
            "SELECT id, latitude, longitude, category, severity, captured_at \
             FROM trash_reports WHERE captured_at >= $1 ORDER BY id",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(ReportPoint::from).collect())
    }

    /// Set `resolved = true` on every report in `ids`. Returns rows affected.
    pub async fn mark_resolved<'e, E>(executor: E, ids: &[DbId]) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("UPDATE trash_reports SET resolved = true WHERE id = ANY($1)")
            .bind(ids)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
