//! Hotspot detection and cleanup task dispatch.
//!
//! Connects the pure stages in `trashmap_core` to the report, truck and
//! task stores in `trashmap_db`:
//!
//! - [`hotspots::load_hotspots`] reads recent reports and aggregates them.
//! - [`monitor::run_monitor_pass`] escalates critical hotspots into tasks.
//! - [`completion::update_task_status`] drives the task lifecycle.
//!
//! Nothing here holds state between calls; every pass recomputes from the
//! database.

pub mod completion;
pub mod error;
pub mod hotspots;
pub mod monitor;

pub use error::PipelineError;
