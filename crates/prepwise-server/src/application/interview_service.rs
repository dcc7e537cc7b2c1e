//! Interview Application Service (Use Case)
//!
//! Orchestrates domain operations for Interview management.

use std::sync::Arc;

use chrono::Utc;

use prepwise::{DomainError, Interview, InterviewRepository};

/// Default page size for the latest-interviews listing
pub const DEFAULT_LATEST_LIMIT: usize = 20;

/// Upper bound on the latest-interviews page size
pub const MAX_LATEST_LIMIT: usize = 100;

fn latest_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_LATEST_LIMIT)
        .min(MAX_LATEST_LIMIT)
}

/// Application service for Interview operations
pub struct InterviewService<R: InterviewRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: InterviewRepository + ?Sized> InterviewService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Get an Interview by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Interview>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// Get a user's Interviews, newest first
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Interview>, DomainError> {
        self.repo.find_by_user(user_id).await
    }

    /// Get finalized Interviews of other users, newest first
    pub async fn list_latest(
        &self,
        exclude_user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Interview>, DomainError> {
        self.repo
            .find_latest_finalized(exclude_user_id, latest_limit(limit))
            .await
    }

    /// Mark an Interview as started, creating an ad-hoc one when no ID is
    /// given. Returns the Interview ID.
    pub async fn start(
        &self,
        interview_id: Option<&str>,
        user_id: &str,
    ) -> Result<String, DomainError> {
        match interview_id {
            Some(id) => {
                let found = self.repo.mark_started(id, user_id, Utc::now()).await?;
                if !found {
                    return Err(DomainError::not_found("Interview", id));
                }
                tracing::info!("Interview started: {} by {}", id, user_id);
                Ok(id.to_string())
            }
            None => {
                let interview = Interview::new_in_progress(user_id);
                let saved = self.repo.create(&interview).await?;
                tracing::info!("Created interview: {} for {}", saved.id, user_id);
                Ok(saved.id)
            }
        }
    }
}
