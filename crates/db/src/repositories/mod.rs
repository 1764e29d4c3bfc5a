//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

mod code_seq;

pub mod conference_application_repo;
pub mod conference_repo;
pub mod dashboard_repo;
pub mod journal_application_repo;
pub mod journal_repo;
pub mod lookup_repo;
pub mod mentor_repo;
pub mod project_repo;
pub mod publication_repo;
pub mod rbm_repo;
pub mod ready_for_publication_repo;
pub mod student_repo;
pub mod tag_repo;
pub mod user_repo;

pub use conference_application_repo::ConferenceApplicationRepo;
pub use conference_repo::ConferenceRepo;
pub use dashboard_repo::DashboardRepo;
pub use journal_application_repo::JournalApplicationRepo;
pub use journal_repo::JournalRepo;
pub use lookup_repo::LookupRepo;
pub use mentor_repo::MentorRepo;
pub use project_repo::ProjectRepo;
pub use publication_repo::PublicationRepo;
pub use rbm_repo::RbmRepo;
pub use ready_for_publication_repo::ReadyForPublicationRepo;
pub use student_repo::StudentRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
