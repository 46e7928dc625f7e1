//! Cleanup task status transitions against a real database.

mod common;

use assert_matches::assert_matches;
use sqlx::PgPool;
use trashmap_core::cleanup::MaterialBreakdown;
use trashmap_core::error::CoreError;
use trashmap_core::types::DbId;
use trashmap_db::models::status::{CleanupTaskStatus, TruckStatus};
use trashmap_db::repositories::{CleanupTaskRepo, RecyclingMaterialRepo, ReportRepo, TruckRepo};
use trashmap_pipeline::completion::{update_task_status, StatusChange};
use trashmap_pipeline::monitor::{run_monitor_pass, MonitorSettings};
use trashmap_pipeline::PipelineError;

use common::{seed_hotspot, seed_truck, tasks_at_hotspot};

/// Seed a critical hotspot and one truck, run a pass, and return
/// `(task_id, truck_id, report_ids)`.
async fn seed_assigned_task(pool: &PgPool) -> (DbId, DbId, Vec<DbId>) {
    let truck_id = seed_truck(pool, "truck-1").await;
    let report_ids = seed_hotspot(pool, &[1, 2, 3, 4, 5, 3]).await;
    run_monitor_pass(pool, &MonitorSettings::default())
        .await
        .unwrap();
    let task = CleanupTaskRepo::find_active_at(pool, 48.8566, 2.3522)
        .await
        .unwrap()
        .expect("task created by monitor pass");
    (task.id, truck_id, report_ids)
}

fn change(status: &str, material: Option<MaterialBreakdown>) -> StatusChange {
    StatusChange::parse(status, material).unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn in_progress_updates_status_only(pool: PgPool) {
    let (task_id, truck_id, _) = seed_assigned_task(&pool).await;

    let update = update_task_status(&pool, task_id, change("IN_PROGRESS", None), false)
        .await
        .unwrap();
    assert!(update.success);
    assert_eq!(update.task.task.status_id, CleanupTaskStatus::InProgress.id());
    assert_eq!(update.task.status, "IN_PROGRESS");
    assert_eq!(update.message, "Cleanup task status updated to IN_PROGRESS");
    assert!(update.material.is_none());

    let truck = TruckRepo::find_by_id(&pool, truck_id).await.unwrap().unwrap();
    assert_eq!(truck.status_id, TruckStatus::Assigned.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_with_materials_releases_truck_and_resolves_reports(pool: PgPool) {
    let (task_id, truck_id, report_ids) = seed_assigned_task(&pool).await;

    let material = MaterialBreakdown {
        plastic_weight: Some(10.0),
        ..Default::default()
    };
    let update = update_task_status(&pool, task_id, change("COMPLETED", Some(material)), false)
        .await
        .unwrap();

    assert_eq!(update.task.status, "COMPLETED");
    assert_eq!(update.message, "Cleanup task status updated to COMPLETED");
    let record = update.material.expect("material record");
    assert_eq!(record.plastic_weight, 10.0);
    assert_eq!(record.paper_weight, 0.0);
    assert_eq!(record.destination_type, "RECYCLING_CENTER");

    let truck = TruckRepo::find_by_id(&pool, truck_id).await.unwrap().unwrap();
    assert_eq!(truck.status_id, TruckStatus::Available.id());

    let reports = ReportRepo::find_by_ids(&pool, &report_ids).await.unwrap();
    assert_eq!(reports.len(), report_ids.len());
    assert!(reports.iter().all(|r| r.resolved));

    assert!(RecyclingMaterialRepo::find_by_task(&pool, task_id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_without_materials_changes_status_only(pool: PgPool) {
    let (task_id, truck_id, report_ids) = seed_assigned_task(&pool).await;

    let update = update_task_status(&pool, task_id, change("COMPLETED", None), false)
        .await
        .unwrap();
    assert_eq!(update.task.task.status_id, CleanupTaskStatus::Completed.id());
    assert!(update.material.is_none());

    // The truck stays bound and the reports stay open.
    let truck = TruckRepo::find_by_id(&pool, truck_id).await.unwrap().unwrap();
    assert_eq!(truck.status_id, TruckStatus::Assigned.id());
    let reports = ReportRepo::find_by_ids(&pool, &report_ids).await.unwrap();
    assert!(reports.iter().all(|r| !r.resolved));
    assert!(RecyclingMaterialRepo::find_by_task(&pool, task_id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_without_materials_is_rejected_when_required(pool: PgPool) {
    let (task_id, _, _) = seed_assigned_task(&pool).await;

    let err = update_task_status(&pool, task_id, change("COMPLETED", None), true)
        .await
        .unwrap_err();
    assert_matches!(err, PipelineError::Core(CoreError::Validation(_)));

    let task = CleanupTaskRepo::find_by_id(&pool, task_id).await.unwrap().unwrap();
    assert_eq!(task.status_id, CleanupTaskStatus::Assigned.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn materials_are_ignored_for_non_completed_status(pool: PgPool) {
    let (task_id, truck_id, _) = seed_assigned_task(&pool).await;

    let material = MaterialBreakdown {
        glass_weight: Some(3.5),
        ..Default::default()
    };
    let update = update_task_status(&pool, task_id, change("IN_PROGRESS", Some(material)), false)
        .await
        .unwrap();
    assert!(update.material.is_none());

    let truck = TruckRepo::find_by_id(&pool, truck_id).await.unwrap().unwrap();
    assert_eq!(truck.status_id, TruckStatus::Assigned.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_weight_is_rejected_without_mutation(pool: PgPool) {
    let (task_id, truck_id, _) = seed_assigned_task(&pool).await;

    let material = MaterialBreakdown {
        metal_weight: Some(-1.0),
        ..Default::default()
    };
    let err = update_task_status(&pool, task_id, change("COMPLETED", Some(material)), false)
        .await
        .unwrap_err();
    assert_matches!(err, PipelineError::Core(CoreError::Validation(_)));

    let truck = TruckRepo::find_by_id(&pool, truck_id).await.unwrap().unwrap();
    assert_eq!(truck.status_id, TruckStatus::Assigned.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_task_is_not_found(pool: PgPool) {
    let err = update_task_status(&pool, 424_242, change("IN_PROGRESS", None), false)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        PipelineError::Core(CoreError::NotFound { entity: "CleanupTask", id: 424_242 })
    );

    let err = update_task_status(
        &pool,
        424_242,
        change("COMPLETED", Some(MaterialBreakdown::default())),
        false,
    )
    .await
    .unwrap_err();
    assert_matches!(err, PipelineError::Core(CoreError::NotFound { .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_task_is_not_found_before_body_validation(pool: PgPool) {
    let material = MaterialBreakdown {
        metal_weight: Some(-1.0),
        ..Default::default()
    };
    let err = update_task_status(&pool, 424_242, change("COMPLETED", Some(material)), false)
        .await
        .unwrap_err();
    assert_matches!(err, PipelineError::Core(CoreError::NotFound { id: 424_242, .. }));

    let err = update_task_status(&pool, 424_242, change("COMPLETED", None), true)
        .await
        .unwrap_err();
    assert_matches!(err, PipelineError::Core(CoreError::NotFound { id: 424_242, .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reopening_superseded_task_conflicts(pool: PgPool) {
    let (first_id, _, _) = seed_assigned_task(&pool).await;
    update_task_status(&pool, first_id, change("COMPLETED", None), false)
        .await
        .unwrap();

    // The first truck stays bound, so the successor needs its own.
    seed_truck(&pool, "truck-2").await;
    let summary = run_monitor_pass(&pool, &MonitorSettings::default())
        .await
        .unwrap();
    assert_eq!(summary.tasks_created, 1);

    for status in ["IN_PROGRESS", "ASSIGNED"] {
        let err = update_task_status(&pool, first_id, change(status, None), false)
            .await
            .unwrap_err();
        assert_matches!(err, PipelineError::Core(CoreError::Conflict(msg)) if msg.contains("active task"));
    }

    let first = CleanupTaskRepo::find_by_id(&pool, first_id).await.unwrap().unwrap();
    assert_eq!(first.status(), Some(CleanupTaskStatus::Completed));
    assert_eq!(tasks_at_hotspot(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_completion_with_materials_conflicts(pool: PgPool) {
    let (task_id, _, _) = seed_assigned_task(&pool).await;
    let material = || MaterialBreakdown {
        paper_weight: Some(2.0),
        ..Default::default()
    };

    update_task_status(&pool, task_id, change("COMPLETED", Some(material())), false)
        .await
        .unwrap();
    let err = update_task_status(&pool, task_id, change("COMPLETED", Some(material())), false)
        .await
        .unwrap_err();
    assert_matches!(err, PipelineError::Core(CoreError::Conflict(msg)) if msg.contains("material record"));

    let record = RecyclingMaterialRepo::find_by_task(&pool, task_id)
        .await
        .unwrap()
        .expect("first record kept");
    assert_eq!(record.paper_weight, 2.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_cell_is_escalated_again(pool: PgPool) {
    let (task_id, _, _) = seed_assigned_task(&pool).await;

    update_task_status(
        &pool,
        task_id,
        change("COMPLETED", Some(MaterialBreakdown::default())),
        false,
    )
    .await
    .unwrap();

    // Reports stay in the window, so the freed truck is dispatched again.
    let summary = run_monitor_pass(&pool, &MonitorSettings::default())
        .await
        .unwrap();
    assert_eq!(summary.tasks_created, 1);
    assert_eq!(tasks_at_hotspot(&pool).await, 2);
}
