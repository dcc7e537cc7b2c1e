//! PostgreSQL Repository Implementations

mod feedback_repository;
mod interview_repository;

pub use feedback_repository::PgFeedbackRepository;
pub use interview_repository::PgInterviewRepository;
