//! Monitor pass: escalate critical hotspots into cleanup tasks.
//!
//! A pass recomputes hotspots, keeps the ones the [`EscalationPolicy`]
//! marks critical, and for each one either skips it (an active task already
//! holds the cell, or no truck is free) or creates an assigned task bound to
//! a claimed truck. Passes are idempotent while a task stays active.

use serde::Serialize;
use sqlx::PgPool;
use trashmap_core::escalation::EscalationPolicy;
use trashmap_core::grid::{self, DEFAULT_GRID_PRECISION, DEFAULT_LOOKBACK_DAYS};
use trashmap_core::hotspot::Hotspot;
use trashmap_db::models::cleanup_task::{CleanupTask, CreateCleanupTask, TaskInsertOutcome};
use trashmap_db::repositories::CleanupTaskRepo;

use crate::error::PipelineResult;
use crate::hotspots::load_hotspots;

/// Parameters of a monitor pass.
#[derive(Debug, Clone, Copy)]
pub struct MonitorSettings {
    pub lookback_days: u32,
    pub grid_precision: u32,
    pub policy: EscalationPolicy,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            grid_precision: DEFAULT_GRID_PRECISION,
            policy: EscalationPolicy::default(),
        }
    }
}

impl MonitorSettings {
    /// Check the window and precision before touching the store.
    pub fn validate(&self) -> PipelineResult<()> {
        grid::validate_lookback_days(self.lookback_days)?;
        grid::validate_precision(self.grid_precision)?;
        Ok(())
    }
}

/// What one monitor pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonitorSummary {
    pub monitored_hotspots: usize,
    pub critical_hotspots: usize,
    pub tasks_created: usize,
    pub skipped_active: usize,
    pub skipped_no_truck: usize,
}

/// Result of dispatching a single critical hotspot.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// A new assigned task bound to a freshly claimed truck.
    Created(CleanupTask),
    /// An assigned or in-progress task already covers the cell.
    AlreadyActive,
    /// Every truck is busy. Retried on the next pass.
    NoTruckAvailable,
}

/// Create a task for `hotspot` unless its cell is already covered.
///
/// The active-task lookup is a fast path. The insert itself is guarded by
/// the partial unique index, so a concurrent pass that wins the race turns
/// this call into [`DispatchOutcome::AlreadyActive`].
pub async fn dispatch_hotspot(pool: &PgPool, hotspot: &Hotspot) -> PipelineResult<DispatchOutcome> {
    if let Some(existing) =
        CleanupTaskRepo::find_active_at(pool, hotspot.latitude, hotspot.longitude).await?
    {
        tracing::debug!(
            task_id = existing.id,
            latitude = hotspot.latitude,
            longitude = hotspot.longitude,
            "Hotspot already covered by an active task",
        );
        return Ok(DispatchOutcome::AlreadyActive);
    }

    let input = CreateCleanupTask {
        latitude: hotspot.latitude,
        longitude: hotspot.longitude,
        report_count: hotspot.report_count,
        avg_severity: hotspot.avg_severity,
        report_ids: hotspot.report_ids(),
    };

    let outcome = match CleanupTaskRepo::create_with_truck(pool, &input).await? {
        TaskInsertOutcome::Created { task, truck } => {
            tracing::info!(
                task_id = task.id,
                truck_id = truck.id,
                latitude = task.latitude,
                longitude = task.longitude,
                report_count = task.report_count,
                "Cleanup task created",
            );
            DispatchOutcome::Created(task)
        }
        TaskInsertOutcome::CellOccupied => DispatchOutcome::AlreadyActive,
        TaskInsertOutcome::NoTruckAvailable => {
            tracing::warn!(
                latitude = hotspot.latitude,
                longitude = hotspot.longitude,
                report_count = hotspot.report_count,
                "No truck available for critical hotspot",
            );
            DispatchOutcome::NoTruckAvailable
        }
    };
    Ok(outcome)
}

/// Run one monitor pass.
///
/// Hotspots are dispatched one after another. A store error aborts the
/// pass; tasks created before the error stay committed.
pub async fn run_monitor_pass(
    pool: &PgPool,
    settings: &MonitorSettings,
) -> PipelineResult<MonitorSummary> {
    settings.validate()?;

    let hotspots = load_hotspots(pool, settings.lookback_days, settings.grid_precision).await?;
    let critical = settings.policy.critical(&hotspots);

    let mut summary = MonitorSummary {
        monitored_hotspots: hotspots.len(),
        critical_hotspots: critical.len(),
        ..Default::default()
    };

    for hotspot in critical {
        match dispatch_hotspot(pool, hotspot).await? {
            DispatchOutcome::Created(_) => summary.tasks_created += 1,
            DispatchOutcome::AlreadyActive => summary.skipped_active += 1,
            DispatchOutcome::NoTruckAvailable => summary.skipped_no_truck += 1,
        }
    }

    tracing::info!(
        monitored = summary.monitored_hotspots,
        critical = summary.critical_hotspots,
        created = summary.tasks_created,
        skipped_active = summary.skipped_active,
        skipped_no_truck = summary.skipped_no_truck,
        "Hotspot monitor pass finished",
    );
    Ok(summary)
}
