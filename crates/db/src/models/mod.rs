//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where one is needed

pub mod badge;
pub mod challenge;
pub mod progress;
pub mod ranking;
pub mod user;
