//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod feedback_repository;
mod interview_repository;

pub use feedback_repository::*;
pub use interview_repository::*;
