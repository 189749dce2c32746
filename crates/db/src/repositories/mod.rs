//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod api_key_repo;
pub mod catalog_repo;
pub mod chat_repo;
pub mod collection_repo;
pub mod contact_repo;
pub mod department_repo;
pub mod graduate_program_repo;
pub mod guidance_config_repo;
pub mod guidance_repo;
pub mod institution_repo;
pub mod notification_repo;
pub mod permission_repo;
pub mod productivity_weight_repo;
pub mod professor_repo;
pub mod research_group_repo;
pub mod researcher_repo;
pub mod role_repo;
pub mod star_repo;
pub mod technician_repo;
pub mod user_repo;

pub use api_key_repo::ApiKeyRepo;
pub use catalog_repo::{AreaRepo, TagRepo};
pub use chat_repo::ChatRepo;
pub use collection_repo::CollectionRepo;
pub use contact_repo::{FeedbackRepo, NewsletterRepo};
pub use department_repo::DepartmentRepo;
pub use graduate_program_repo::GraduateProgramRepo;
pub use guidance_config_repo::GuidanceConfigRepo;
pub use guidance_repo::GuidanceRepo;
pub use institution_repo::InstitutionRepo;
pub use notification_repo::NotificationRepo;
pub use permission_repo::PermissionRepo;
pub use productivity_weight_repo::ProductivityWeightRepo;
pub use professor_repo::ProfessorRepo;
pub use research_group_repo::ResearchGroupRepo;
pub use researcher_repo::ResearcherRepo;
pub use role_repo::RoleRepo;
pub use star_repo::StarRepo;
pub use technician_repo::TechnicianRepo;
pub use user_repo::UserRepo;
