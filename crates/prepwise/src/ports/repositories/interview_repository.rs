//! Interview Repository Port
//!
//! Abstract interface for Interview persistence operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{errors::DomainError, Interview};

/// Repository interface for Interview entities
#[async_trait]
pub trait InterviewRepository: Send + Sync {
    /// Find an Interview by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Interview>, DomainError>;

    /// Find all Interviews owned by a user, newest first
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Interview>, DomainError>;

    /// Find finalized Interviews of other users, newest first
    async fn find_latest_finalized(
        &self,
        exclude_user_id: &str,
        limit: usize,
    ) -> Result<Vec<Interview>, DomainError>;

    /// Insert a new Interview
    async fn create(&self, interview: &Interview) -> Result<Interview, DomainError>;

    /// Merge `started_at` and `user_id` into an existing Interview,
    /// leaving every other field untouched.
    ///
    /// Returns `false` when no Interview has the given ID.
    async fn mark_started(
        &self,
        id: &str,
        user_id: &str,
        started_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}
