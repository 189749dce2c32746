//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (mostly `Option` fields) for patches

pub mod api_key;
pub mod chat;
pub mod catalog;
pub mod collection;
pub mod contact;
pub mod department;
pub mod graduate_program;
pub mod guidance;
pub mod institution;
pub mod notification;
pub mod productivity_weight;
pub mod professor;
pub mod rbac;
pub mod research_group;
pub mod researcher;
pub mod star;
pub mod technician;
pub mod user;
