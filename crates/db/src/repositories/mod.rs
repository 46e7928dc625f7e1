//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that participate in a
//! larger transaction accept any [`sqlx::PgExecutor`] instead.

pub mod cleanup_task_repo;
pub mod recycling_material_repo;
pub mod report_repo;
pub mod truck_repo;

pub use cleanup_task_repo::CleanupTaskRepo;
pub use recycling_material_repo::RecyclingMaterialRepo;
pub use report_repo::ReportRepo;
pub use truck_repo::TruckRepo;
