//! Integration tests for the truck / cleanup task / recycling material
//! repositories against a real database.

use assert_matches::assert_matches;
use sqlx::PgPool;
use trashmap_core::cleanup::MaterialBreakdown;
use trashmap_db::models::cleanup_task::{CreateCleanupTask, TaskInsertOutcome};
use trashmap_db::models::report::CreateTrashReport;
use trashmap_db::models::status::{CleanupTaskStatus, TruckStatus};
use trashmap_db::models::truck::CreateTruck;
use trashmap_db::repositories::{CleanupTaskRepo, RecyclingMaterialRepo, ReportRepo, TruckRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_truck(pool: &PgPool, name: &str) -> i64 {
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

async fn new_report(pool: &PgPool, severity: i16) -> i64 {
    ReportRepo::create(
        pool,
        &CreateTrashReport {
            latitude: 48.8566,
            longitude: 2.3522,
            category: None,
            severity,
            captured_at: None,
            reporter_id: None,
            classification: None,
        },
    )
    .await
    .expect("report creation should succeed")
    .id
}

/// Count tasks in any status at the test cell.
async fn tasks_at_cell(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM cleanup_tasks WHERE latitude = $1 AND longitude = $2")
        .bind(48.8566_f64)
        .bind(2.3522_f64)
        .fetch_one(pool)
        .await
        .unwrap()
}

fn new_task(report_ids: Vec<i64>) -> CreateCleanupTask {
    CreateCleanupTask {
        latitude: 48.8566,
        longitude: 2.3522,
        report_count: report_ids.len() as i64,
        avg_severity: 3.0,
        report_ids,
    }
}

// ---------------------------------------------------------------------------
// Task creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_truck_assigns_truck(pool: PgPool) {
    let truck_id = new_truck(&pool, "truck-1").await;

    let outcome = CleanupTaskRepo::create_with_truck(&pool, &new_task(vec![1, 2, 3]))
        .await
        .unwrap();

    let task = assert_matches!(outcome, TaskInsertOutcome::Created { task, truck } => {
        assert_eq!(truck.id, truck_id);
        assert_eq!(truck.status_id, TruckStatus::Assigned.id());
        task
    });
    assert_eq!(task.truck_id, Some(truck_id));
    assert_eq!(task.status_id, CleanupTaskStatus::Assigned.id());
    assert_eq!(task.report_ids, vec![1, 2, 3]);
    assert_eq!(task.report_count, 3);

    let truck = TruckRepo::find_by_id(&pool, truck_id).await.unwrap().unwrap();
    assert_eq!(truck.status_id, TruckStatus::Assigned.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_truck_writes_nothing(pool: PgPool) {
    let outcome = CleanupTaskRepo::create_with_truck(&pool, &new_task(vec![1]))
        .await
        .unwrap();

    assert_matches!(outcome, TaskInsertOutcome::NoTruckAvailable);
    assert_eq!(tasks_at_cell(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn occupied_cell_rolls_back_truck_claim(pool: PgPool) {
    let first = new_truck(&pool, "truck-1").await;
    let second = new_truck(&pool, "truck-2").await;

    let outcome = CleanupTaskRepo::create_with_truck(&pool, &new_task(vec![1]))
        .await
        .unwrap();
    assert_matches!(outcome, TaskInsertOutcome::Created { .. });

    let outcome = CleanupTaskRepo::create_with_truck(&pool, &new_task(vec![2]))
        .await
        .unwrap();
    assert_matches!(outcome, TaskInsertOutcome::CellOccupied);

    let first = TruckRepo::find_by_id(&pool, first).await.unwrap().unwrap();
    let second = TruckRepo::find_by_id(&pool, second).await.unwrap().unwrap();
    assert_eq!(first.status_id, TruckStatus::Assigned.id());
    assert_eq!(second.status_id, TruckStatus::Available.id());
    assert_eq!(tasks_at_cell(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_task_frees_the_cell(pool: PgPool) {
    new_truck(&pool, "truck-1").await;
    new_truck(&pool, "truck-2").await;

    let outcome = CleanupTaskRepo::create_with_truck(&pool, &new_task(vec![1]))
        .await
        .unwrap();
    let task = assert_matches!(outcome, TaskInsertOutcome::Created { task, .. } => task);

    CleanupTaskRepo::update_status(&pool, task.id, CleanupTaskStatus::Completed.id())
        .await
        .unwrap()
        .unwrap();
    assert!(CleanupTaskRepo::find_active_at(&pool, 48.8566, 2.3522)
        .await
        .unwrap()
        .is_none());

    let outcome = CleanupTaskRepo::create_with_truck(&pool, &new_task(vec![2]))
        .await
        .unwrap();
    assert_matches!(outcome, TaskInsertOutcome::Created { .. });
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn complete_with_materials_applies_all_side_effects(pool: PgPool) {
    let truck_id = new_truck(&pool, "truck-1").await;
    let r1 = new_report(&pool, 2).await;
    let r2 = new_report(&pool, 4).await;

    let outcome = CleanupTaskRepo::create_with_truck(&pool, &new_task(vec![r1, r2]))
        .await
        .unwrap();
    let task = assert_matches!(outcome, TaskInsertOutcome::Created { task, .. } => task);

    let materials = MaterialBreakdown {
        plastic_weight: Some(10.0),
        ..Default::default()
    }
    .resolve()
    .unwrap();

    let completed = CleanupTaskRepo::complete_with_materials(&pool, task.id, &materials)
        .await
        .unwrap()
        .expect("task exists");

    assert_eq!(completed.task.status_id, CleanupTaskStatus::Completed.id());
    assert_eq!(completed.released_truck_id, Some(truck_id));
    assert_eq!(completed.resolved_reports, 2);
    assert_eq!(completed.material.plastic_weight, 10.0);
    assert_eq!(completed.material.glass_weight, 0.0);
    assert_eq!(completed.material.destination_type, "RECYCLING_CENTER");

    let truck = TruckRepo::find_by_id(&pool, truck_id).await.unwrap().unwrap();
    assert_eq!(truck.status_id, TruckStatus::Available.id());

    let reports = ReportRepo::find_by_ids(&pool, &[r1, r2]).await.unwrap();
    assert!(reports.iter().all(|r| r.resolved));

    let stored = RecyclingMaterialRepo::find_by_task(&pool, task.id)
        .await
        .unwrap()
        .expect("material row");
    assert_eq!(stored.id, completed.material.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn complete_unknown_task_returns_none(pool: PgPool) {
    let materials = MaterialBreakdown::default().resolve().unwrap();
    let result = CleanupTaskRepo::complete_with_materials(&pool, 999_999, &materials)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_material_record_is_rejected(pool: PgPool) {
    new_truck(&pool, "truck-1").await;
    let outcome = CleanupTaskRepo::create_with_truck(&pool, &new_task(vec![1]))
        .await
        .unwrap();
    let task = assert_matches!(outcome, TaskInsertOutcome::Created { task, .. } => task);

    let materials = MaterialBreakdown::default().resolve().unwrap();
    CleanupTaskRepo::complete_with_materials(&pool, task.id, &materials)
        .await
        .unwrap()
        .unwrap();

    let err = CleanupTaskRepo::complete_with_materials(&pool, task.id, &materials)
        .await
        .unwrap_err();
    let db_err = assert_matches!(err, sqlx::Error::Database(e) => e);
    assert_eq!(db_err.constraint(), Some("uq_recycling_materials_task"));
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_with_trucks_filters_by_status(pool: PgPool) {
    let truck_id = new_truck(&pool, "truck-1").await;
    CleanupTaskRepo::create_with_truck(&pool, &new_task(vec![1]))
        .await
        .unwrap();

    let all = CleanupTaskRepo::list_with_trucks(&pool, None).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, "ASSIGNED");
    let truck = all[0].truck.as_ref().expect("bound truck");
    assert_eq!(truck.truck.id, truck_id);
    assert_eq!(truck.truck.name, "truck-1");
    assert_eq!(truck.status, "ASSIGNED");

    let completed = CleanupTaskRepo::list_with_trucks(&pool, Some(CleanupTaskStatus::Completed.id()))
        .await
        .unwrap();
    assert!(completed.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_trucks_by_status(pool: PgPool) {
    new_truck(&pool, "truck-1").await;
    new_truck(&pool, "truck-2").await;
    CleanupTaskRepo::create_with_truck(&pool, &new_task(vec![1]))
        .await
        .unwrap();

    let available = TruckRepo::list(&pool, Some(TruckStatus::Available.id()))
        .await
        .unwrap();
    let assigned = TruckRepo::list(&pool, Some(TruckStatus::Assigned.id()))
        .await
        .unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(assigned.len(), 1);
    assert_eq!(TruckRepo::list(&pool, None).await.unwrap().len(), 2);
}
