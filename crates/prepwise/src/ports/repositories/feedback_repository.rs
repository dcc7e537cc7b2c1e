//! Feedback Repository Port
//!
//! Abstract interface for Feedback persistence operations.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Feedback};

/// Repository interface for Feedback entities
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Write a Feedback record as a single atomic set.
    ///
    /// An existing record with the same ID is overwritten entirely.
    async fn save(&self, feedback: &Feedback) -> Result<Feedback, DomainError>;

    /// Find the most recent Feedback for an Interview
    async fn find_latest_by_interview(
        &self,
        interview_id: &str,
    ) -> Result<Option<Feedback>, DomainError>;
}
