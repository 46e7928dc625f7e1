//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod cleanup_task;
pub mod recycling_material;
pub mod report;
pub mod status;
pub mod truck;
