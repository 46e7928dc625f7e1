pub mod cleanup;
pub mod hotspots;
pub mod reports;
pub mod trucks;
