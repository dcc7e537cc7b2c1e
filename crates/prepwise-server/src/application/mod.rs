//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod feedback_service;
mod interview_service;

pub use feedback_service::{FeedbackOutcome, FeedbackService, GenerateFeedback};
pub use interview_service::InterviewService;
