//! Domain logic for the trash reporting platform.
//!
//! Everything in this crate is pure: no database access, no I/O. The
//! hotspot pipeline is split into three stages that the `pipeline` crate
//! chains together:
//!
//! 1. [`grid`] partitions geotagged reports into rounded-coordinate cells.
//! 2. [`hotspot`] turns non-empty cells into hotspots with average severity.
//! 3. [`escalation`] picks the hotspots that warrant a cleanup task.

pub mod cleanup;
pub mod error;
pub mod escalation;
pub mod grid;
pub mod hotspot;
pub mod paging;
pub mod report;
pub mod types;
