//! Shared fixtures for pipeline integration tests.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::PgPool;
use trashmap_core::types::DbId;
use trashmap_db::models::report::CreateTrashReport;
use trashmap_db::models::truck::CreateTruck;
use trashmap_db::repositories::{ReportRepo, TruckRepo};

/// Centre of the test hotspot. Rounds to (48.8566, 2.3522) at precision 4.
pub const LAT: f64 = 48.856_61;
pub const LNG: f64 = 2.352_19;

pub async fn seed_truck(pool: &PgPool, name: &str) -> DbId {
    TruckRepo::create(
        pool,
        &CreateTruck {
            name: name.to_string(),
        },
    )
    .await
    .expect("truck creation should succeed")
    .id
}

pub async fn seed_report_at(
    pool: &PgPool,
    latitude: f64,
    longitude: f64,
    severity: i16,
    age_days: i64,
) -> DbId {
    ReportRepo::create(
        pool,
        &CreateTrashReport {
            latitude,
            longitude,
            category: Some("plastic".to_string()),
            severity,
            captured_at: Some(Utc::now() - Duration::days(age_days)),
            reporter_id: None,
            classification: None,
        },
    )
    .await
    .expect("report creation should succeed")
    .id
}

/// Seed one fresh report per severity, all inside the test hotspot cell.
pub async fn seed_hotspot(pool: &PgPool, severities: &[i16]) -> Vec<DbId> {
    let mut ids = Vec::with_capacity(severities.len());
    for (i, severity) in severities.iter().enumerate() {
        // Jitter stays well inside one 1e-4 cell.
        let jitter = i as f64 * 0.000_001;
        ids.push(seed_report_at(pool, LAT + jitter, LNG - jitter, *severity, 0).await);
    }
    ids
}

/// Count tasks in any status at the test hotspot cell.
pub async fn tasks_at_hotspot(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM cleanup_tasks WHERE latitude = $1 AND longitude = $2")
        .bind(48.8566_f64)
        .bind(2.3522_f64)
        .fetch_one(pool)
        .await
        .expect("count query should succeed")
}
